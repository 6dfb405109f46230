/// Converts a major-unit amount (dollars) to integer minor units (cents), rounding to the
/// nearest cent.
///
/// Returns `None` for non-finite or non-positive input, for amounts that round to zero cents,
/// and for amounts whose minor units do not fit in an `i64`. Upper limits are left to the
/// payment processor.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn to_minor_units(amount_major: f64) -> Option<i64> {
    if !amount_major.is_finite() || amount_major <= 0.0 {
        return None;
    }
    let minor = (amount_major * 100.0).round();
    if minor < 1.0 || minor >= i64::MAX as f64 {
        return None;
    }
    Some(minor as i64)
}

/// Lowercased three-letter currency code, or `None` if `raw` is not one.
pub fn normalize_currency(raw: &str) -> Option<String> {
    let code = raw.trim();
    (code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_lowercase())
}

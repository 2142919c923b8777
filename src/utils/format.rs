//! Number formatting for metric cards.

/// Insert a comma between every group of three digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format with thousands separators and a fixed number of decimals.
///
/// The sign is returned separately so callers can decide how to show it.
/// A value that rounds to zero is never negative.
fn split_sign(value: f64, decimals: usize) -> (bool, String) {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let negative = value.is_sign_negative() && !is_zero;

    let mut body = group_thousands(int_part);
    if let Some(frac) = frac_part {
        body.push('.');
        body.push_str(frac);
    }
    (negative, body)
}

/// Always-signed value with two decimals, e.g. `+1,234.50` or `-0.25`.
pub fn format_signed(value: f64) -> String {
    let (negative, body) = split_sign(value, 2);
    format!("{}{}", if negative { '-' } else { '+' }, body)
}

/// Card headline value in thousands notation, e.g. `1,235K`.
pub fn format_thousands_k(value: f64) -> String {
    let (negative, body) = split_sign(value, 0);
    format!("{}{}K", if negative { "-" } else { "" }, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(150.0), "+150.00");
        assert_eq!(format_signed(-0.25), "-0.25");
        assert_eq!(format_signed(1234.5), "+1,234.50");
        assert_eq!(format_signed(-9876543.219), "-9,876,543.22");
    }

    #[test]
    fn test_format_signed_zero_is_positive() {
        assert_eq!(format_signed(0.0), "+0.00");
        assert_eq!(format_signed(-0.0), "+0.00");
        assert_eq!(format_signed(-0.001), "+0.00");
    }

    #[test]
    fn test_format_thousands_k() {
        assert_eq!(format_thousands_k(250.0), "250K");
        assert_eq!(format_thousands_k(1234.4), "1,234K");
        assert_eq!(format_thousands_k(1234.6), "1,235K");
        assert_eq!(format_thousands_k(-4200.0), "-4,200K");
        assert_eq!(format_thousands_k(0.0), "0K");
    }
}

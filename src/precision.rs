//! Decimal rounding used to keep stored values free of binary floating-point drift.

/// Rounds `value` to `decimals` fractional digits, resolving ties away from zero.
///
/// Rounding is performed on the shortest decimal representation of `value`, so a
/// value printed as `0.123456785` rounds up to `0.12345679` even though its binary
/// form lies slightly below the tie. Non-finite values are returned unchanged.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // `Display` for f64 never switches to exponent notation.
    let repr = value.to_string();
    let negative = repr.starts_with('-');
    let unsigned = repr.trim_start_matches('-');
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let keep = decimals as usize;
    if frac_part.len() <= keep {
        return value;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..keep].bytes())
        .collect();

    if frac_part.as_bytes()[keep] >= b'5' {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - keep;
    let mut text = String::with_capacity(digits.len() + 2);
    if negative {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|d| *d as char));
    if keep > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|d| *d as char));
    }
    text.parse().unwrap_or(value)
}

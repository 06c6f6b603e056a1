/// Exponent window outside of which PHP switches to `E` notation.
const PRECISION: i32 = 17;

pub fn format_int(value: i64) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}

/// Formats a float the way `var_export` does with the default
/// `serialize_precision`: shortest round-trip digits, always with a
/// fractional part, `E+NN` outside the plain-notation window.
pub fn format_php_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let (negative, digits, decpt) = decompose(buffer.format_finite(value));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if decpt < -3 || decpt > PRECISION {
        out.push_str(&digits[..1]);
        out.push('.');
        if digits.len() > 1 {
            out.push_str(&digits[1..]);
        } else {
            out.push('0');
        }
        let exp = decpt - 1;
        out.push('E');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&format_int(i64::from(exp.abs())));
        return out;
    }
    if decpt <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-decpt) as usize));
        out.push_str(&digits);
        return out;
    }
    let pos = decpt as usize;
    if pos >= digits.len() {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', pos - digits.len()));
        out.push_str(".0");
        return out;
    }
    out.push_str(&digits[..pos]);
    out.push('.');
    out.push_str(&digits[pos..]);
    out
}

/// Splits ryu output into sign, significant digits and the position of the
/// decimal point relative to the first significant digit.
fn decompose(raw: &str) -> (bool, String, i32) {
    let bytes = raw.as_bytes();
    let mut i = 0;
    let mut negative = false;
    if bytes.get(i) == Some(&b'-') {
        negative = true;
        i += 1;
    }

    let mut digits = String::new();
    let mut dot_pos = None;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                digits.push(bytes[i] as char);
                i += 1;
            }
            b'.' => {
                dot_pos = Some(digits.len());
                i += 1;
            }
            b'e' | b'E' => {
                i += 1;
                break;
            }
            _ => {
                i += 1;
            }
        }
    }

    let mut exp_sign = 1i32;
    if i < bytes.len() {
        if bytes[i] == b'-' {
            exp_sign = -1;
            i += 1;
        } else if bytes[i] == b'+' {
            i += 1;
        }
    }
    let mut exp: i32 = 0;
    while i < bytes.len() {
        if let b'0'..=b'9' = bytes[i] {
            exp = exp
                .saturating_mul(10)
                .saturating_add((bytes[i] - b'0') as i32);
        }
        i += 1;
    }
    exp *= exp_sign;

    let mut decpt = dot_pos.unwrap_or(digits.len()) as i32 + exp;
    let leading = digits.bytes().take_while(|byte| *byte == b'0').count();
    decpt -= leading as i32;
    let trimmed = digits[leading..].trim_end_matches('0').to_string();
    (negative, trimmed, decpt)
}

//! Canonical number rendering

use std::fmt::Write as _;

/// Exponents at or above this switch to scientific notation
const EXP_UPPER: i32 = 6;
/// Exponents below this switch to scientific notation
const EXP_LOWER: i32 = -4;

#[inline]
pub fn append_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(itoa::Buffer::new().format(value).as_bytes())
}

/// Append the shortest decimal that reads back as exactly `value`
///
/// Plain notation is used for decimal exponents in `[-4, 6)`, scientific
/// notation with a signed two-digit minimum exponent otherwise (`1e-05`,
/// `1.5e+06`). Non-finite values have no JSON number form and are written as the
/// strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
pub fn append_f32(out: &mut Vec<u8>, value: f32) {
    if value.is_nan() {
        return out.extend_from_slice(b"\"NaN\"");
    }
    if value.is_infinite() {
        let text: &[u8] = if value > 0.0 { b"\"Infinity\"" } else { b"\"-Infinity\"" };
        return out.extend_from_slice(text);
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7"
    let mut sci = String::with_capacity(16);
    let _ = write!(sci, "{value:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => (true, m),
        None => (false, mantissa),
    };
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    if negative {
        out.push(b'-');
    }
    if (EXP_LOWER..EXP_UPPER).contains(&exp) {
        append_plain(out, &digits, exp);
    } else {
        append_scientific(out, &digits, exp);
    }
}

/// `digits` = d1 d2 .. dn meaning d1.d2..dn × 10^exp
fn append_plain(out: &mut Vec<u8>, digits: &[u8], exp: i32) {
    if exp < 0 {
        out.extend_from_slice(b"0.");
        out.extend(::core::iter::repeat_n(b'0', (-exp - 1) as usize));
        out.extend_from_slice(digits);
        return;
    }

    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        out.extend_from_slice(digits);
        out.extend(::core::iter::repeat_n(b'0', int_len - digits.len()));
    } else {
        out.extend_from_slice(&digits[..int_len]);
        out.push(b'.');
        out.extend_from_slice(&digits[int_len..]);
    }
}

fn append_scientific(out: &mut Vec<u8>, digits: &[u8], exp: i32) {
    if let Some((first, fraction)) = digits.split_first() {
        out.push(*first);
        if !fraction.is_empty() {
            out.push(b'.');
            out.extend_from_slice(fraction);
        }
    }
    out.push(b'e');
    out.push(if exp < 0 { b'-' } else { b'+' });
    let magnitude = exp.unsigned_abs();
    if magnitude < 10 {
        out.push(b'0');
    }
    out.extend_from_slice(itoa::Buffer::new().format(magnitude).as_bytes());
}

//! JSON string escaping

/// Whether `b` can be copied into a JSON string verbatim
///
/// Non-ASCII bytes are safe here because the whole input is validated as UTF-8
/// before scanning.
#[inline(always)]
const fn is_safe(b: u8) -> bool { b >= 0x20 && b != b'"' && b != b'\\' }

/// Index of the first byte that needs escaping, or `bytes.len()`
#[inline]
fn index_need_escape(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| !is_safe(b)).unwrap_or(bytes.len())
}

/// Append `input` as a quoted JSON string
///
/// # Errors
/// Returns the offset of the first invalid UTF-8 sequence. Nothing is appended
/// in that case.
pub fn append_string(out: &mut Vec<u8>, input: &[u8]) -> Result<(), usize> {
    let text = ::core::str::from_utf8(input).map_err(|e| e.valid_up_to())?;
    let mut rest = text.as_bytes();

    out.reserve(rest.len() + 2);
    out.push(b'"');
    loop {
        let safe = index_need_escape(rest);
        out.extend_from_slice(&rest[..safe]);

        let Some((&b, tail)) = rest[safe..].split_first() else { break };
        out.push(b'\\');
        match b {
            b'"' | b'\\' => out.push(b),
            0x08 => out.push(b'b'),
            0x0c => out.push(b'f'),
            b'\n' => out.push(b'n'),
            b'\r' => out.push(b'r'),
            b'\t' => out.push(b't'),
            _ => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                out.extend_from_slice(&[
                    b'u',
                    b'0',
                    b'0',
                    HEX[(b >> 4) as usize],
                    HEX[(b & 0x0f) as usize],
                ]);
            }
        }
        rest = tail;
    }
    out.push(b'"');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(input: &[u8]) -> String {
        let mut out = Vec::new();
        append_string(&mut out, input).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_text_copied() {
        assert_eq!(escaped(b"Fight Club"), r#""Fight Club""#);
        assert_eq!(escaped(b""), r#""""#);
    }

    #[test]
    fn test_short_escapes() {
        assert_eq!(escaped(b"a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(escaped(b"\x08\x0c\n\r\t"), r#""\b\f\n\r\t""#);
    }

    #[test]
    fn test_generic_control_escapes() {
        assert_eq!(escaped(b"\x00"), r#""\u0000""#);
        assert_eq!(escaped(b"x\x01y\x1f"), r#""x\u0001y\u001f""#);
        // DEL is not a control character for JSON
        assert_eq!(escaped(b"\x7f"), "\"\x7f\"");
    }

    #[test]
    fn test_multibyte_utf8_passes_through() {
        assert_eq!(escaped("Amélie – 東京".as_bytes()), "\"Amélie – 東京\"");
        assert_eq!(escaped("\u{fffd}".as_bytes()), "\"\u{fffd}\"");
    }

    #[test]
    fn test_invalid_utf8_rejected_without_output() {
        let mut out = b"prefix".to_vec();
        assert_eq!(append_string(&mut out, b"ok\xffno"), Err(2));
        assert_eq!(out, b"prefix");

        // truncated multi-byte sequence
        assert_eq!(append_string(&mut out, b"\xe6\x9d"), Err(0));
    }

    #[test]
    fn test_output_is_valid_json() {
        let input: Vec<u8> = (0u8..0x80).collect();
        let out = escaped(&input);
        let parsed: String = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_bytes(), input.as_slice());
    }
}

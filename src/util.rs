//! Input decoding helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the charset declared in a `<meta>` tag near the
///    top of the document
/// 3. Falls back to Windows-1252 (common in legacy CMS exports)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
///
/// # Examples
///
/// ```
/// use marticle::decode_text;
///
/// assert_eq!(decode_text("Hello, World!".as_bytes()), "Hello, World!");
/// assert_eq!(decode_text(b"caf\xe9"), "café");
/// ```
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = extract_meta_charset(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        tracing::debug!(charset = encoding.name(), "decoding with declared charset");
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the charset from `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
///
/// Only the first 1024 bytes are checked, as browsers do.
fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after = &prefix[pos + 8..];

    let (start, terminators): (usize, &[u8]) = match after.first()? {
        b'"' => (1, b"\""),
        b'\'' => (1, b"'"),
        _ => (0, b"\"'; >/"),
    };

    let value = &after[start..];
    let end = value
        .iter()
        .position(|b| terminators.contains(b) || b.is_ascii_whitespace())
        .unwrap_or(value.len());

    std::str::from_utf8(&value[..end])
        .ok()
        .filter(|name| !name.is_empty())
}

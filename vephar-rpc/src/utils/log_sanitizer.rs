//! Body previews for logs
//!
//! Stored values come back in response bodies and go out in upload bodies.
//! Logs only ever see a bounded preview of them: text is cut after
//! [`PREVIEW_BYTES`], binary is summarized by size.

/// Longest text preview, in bytes.
pub const PREVIEW_BYTES: usize = 256;

/// `s` cut to at most [`PREVIEW_BYTES`] bytes, never inside a character.
/// A cut preview ends with the full length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= PREVIEW_BYTES {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(start, _)| start)
        .take_while(|&start| start <= PREVIEW_BYTES)
        .last()
        .unwrap_or(0);
    format!("{}... ({} bytes total)", &s[..cut], s.len())
}

/// Size and media type of an upload, without its contents.
pub fn describe_bytes(bytes: &[u8], content_type: &str) -> String {
    format!("<{} bytes of {content_type}>", bytes.len())
}

/// Preview of a response body: truncated text when it is UTF-8, a size
/// summary otherwise.
pub fn preview_body(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => truncate_for_log(text),
        Err(_) => format!("<{} bytes, not UTF-8>", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_kept_whole() {
        assert_eq!(truncate_for_log("user-1"), "user-1");
        let full = "k".repeat(PREVIEW_BYTES);
        assert_eq!(truncate_for_log(&full), full);
    }

    #[test]
    fn long_text_cut_with_total() {
        let long = "v".repeat(PREVIEW_BYTES + 44);
        assert_eq!(
            truncate_for_log(&long),
            format!("{}... (300 bytes total)", "v".repeat(PREVIEW_BYTES))
        );
    }

    #[test]
    fn cut_lands_on_char_boundary() {
        // 2-byte chars: byte PREVIEW_BYTES + 1 would split one
        let long = format!("x{}", "ж".repeat(200));
        let preview = truncate_for_log(&long);
        let (head, _) = preview.split_once("...").unwrap();
        assert!(head.len() <= PREVIEW_BYTES);
        assert!(head.ends_with('ж'));
    }

    #[test]
    fn uploads_summarized() {
        assert_eq!(
            describe_bytes(&[1, 2, 3], "image/png"),
            "<3 bytes of image/png>"
        );
    }

    #[test]
    fn binary_body_not_echoed() {
        assert_eq!(preview_body(&[0xff, 0xfe, 0x00]), "<3 bytes, not UTF-8>");
        assert_eq!(preview_body(br#"{"Error":""}"#), r#"{"Error":""}"#);
    }
}

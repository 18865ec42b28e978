//! Word-compatible export of the rewritten document

use html_escape::encode_text;

/// MIME type Word opens HTML documents under
pub const WORD_MIME_TYPE: &str = "application/vnd.ms-word";

const WORD_PREAMBLE: &str = concat!(
    "<html xmlns:o='urn:schemas-microsoft-com:office:office' ",
    "xmlns:w='urn:schemas-microsoft-com:office:word' ",
    "xmlns='http://www.w3.org/TR/REC-html40'>",
    "<head><meta charset='utf-8'><title>Export HTML To Doc</title>",
    "<style>body { font-family: 'Calibri', sans-serif; white-space: pre-wrap; }</style>",
    "</head><body>",
);
const WORD_POSTAMBLE: &str = "</body></html>";

/// Build the `.doc` HTML body for `text`, one `<br>` per line break
pub fn word_document_html(text: &str) -> String {
    let body = text
        .split('\n')
        .map(|line| encode_text(line))
        .collect::<Vec<_>>()
        .join("<br>");
    format!("{}<div>{}</div>{}", WORD_PREAMBLE, body, WORD_POSTAMBLE)
}

/// File name for an export created at `timestamp_ms` (Unix millis)
pub fn export_file_name(timestamp_ms: u64, extension: &str) -> String {
    format!("inclusive-document-{}.{}", timestamp_ms, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_document_wraps_text() {
        let html = word_document_html("Hello all");
        assert!(html.starts_with("<html xmlns:o="));
        assert!(html.contains("<div>Hello all</div>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn test_word_document_line_breaks() {
        let html = word_document_html("Line one\nLine two\n\nLine four");
        assert!(html.contains("<div>Line one<br>Line two<br><br>Line four</div>"));
    }

    #[test]
    fn test_word_document_escapes() {
        let html = word_document_html("Terms & <conditions>");
        assert!(html.contains("Terms &amp; &lt;conditions&gt;"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(1_700_000_000_000, "doc"),
            "inclusive-document-1700000000000.doc"
        );
    }
}

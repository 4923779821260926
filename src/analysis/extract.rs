//! Raw text extraction from uploaded files.
//!
//! Only text content is decoded here. Images and PDFs need an OCR engine
//! or a PDF text layer reader, which this crate does not ship, so they are
//! reported as unsupported instead of being decoded as garbage.

use crate::error::{Error, Result};

const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Image,
    Pdf,
    Text,
}

pub fn detect_kind(mime_type: Option<&str>, filename: &str) -> SourceKind {
    let mime = mime_type.unwrap_or_default().to_ascii_lowercase();
    let name = filename.to_ascii_lowercase();

    if IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) || mime.starts_with("image/") {
        SourceKind::Image
    } else if name.ends_with(".pdf") || mime == "application/pdf" {
        SourceKind::Pdf
    } else {
        SourceKind::Text
    }
}

/// Decodes the text content of a file, dropping invalid UTF-8 sequences.
pub fn extract_text(bytes: &[u8], mime_type: Option<&str>, filename: &str) -> Result<String> {
    match detect_kind(mime_type, filename) {
        SourceKind::Image => Err(Error::Unsupported(format!(
            "{} is an image; OCR is not available",
            filename
        ))),
        SourceKind::Pdf => Err(Error::Unsupported(format!(
            "{} is a PDF; PDF text extraction is not available",
            filename
        ))),
        SourceKind::Text => {
            let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
            log::debug!("Decoded {} chars from {}", text.chars().count(), filename);
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind(None, "scan.PNG"), SourceKind::Image);
        assert_eq!(detect_kind(Some("image/webp"), "upload"), SourceKind::Image);
        assert_eq!(detect_kind(None, "notes.pdf"), SourceKind::Pdf);
        assert_eq!(detect_kind(Some("application/pdf"), "blob"), SourceKind::Pdf);
        assert_eq!(detect_kind(Some("text/plain"), "notes.txt"), SourceKind::Text);
        assert_eq!(detect_kind(None, "README"), SourceKind::Text);
    }

    #[test]
    fn test_plain_text_is_decoded() {
        let text = extract_text("Révision: grammaire".as_bytes(), None, "notes.txt").unwrap();
        assert_eq!(text, "Révision: grammaire");
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        let text = extract_text(b"abc\xffdef", None, "notes.txt").unwrap();
        assert_eq!(text, "abcdef");

        // A real replacement character in valid input is kept
        let mut bytes = "kept \u{FFFD} here".as_bytes().to_vec();
        bytes.extend_from_slice(b"\xfe!");
        let text = extract_text(&bytes, None, "notes.txt").unwrap();
        assert_eq!(text, "kept \u{FFFD} here!");
    }

    #[test]
    fn test_images_and_pdfs_unsupported() {
        assert!(matches!(
            extract_text(b"\x89PNG", None, "scan.png"),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            extract_text(b"%PDF-1.7", Some("application/pdf"), "doc"),
            Err(Error::Unsupported(_))
        ));
    }
}

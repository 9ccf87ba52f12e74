//! Upload ingestion: turns an uploaded file into statement text.
//!
//! Plain text is decoded as UTF-8. PDF extraction is CPU-bound and runs inside
//! `tokio::task::spawn_blocking`.

use anyhow::Context;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    PlainText,
    Pdf,
}

/// Supported uploads are recognised by extension only.
pub fn detect_kind(file_name: &str) -> Option<UploadKind> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "txt" | "md" => Some(UploadKind::PlainText),
        "pdf" => Some(UploadKind::Pdf),
        _ => None,
    }
}

pub async fn extract_text(file_name: &str, data: Bytes) -> Result<String, AppError> {
    let kind = detect_kind(file_name).ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "Unsupported file type for '{file_name}'. Upload a .txt, .md, or .pdf file."
        ))
    })?;

    let text = match kind {
        UploadKind::PlainText => String::from_utf8(data.to_vec()).map_err(|_| {
            AppError::UnprocessableEntity(format!("'{file_name}' is not valid UTF-8 text"))
        })?,
        UploadKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data)
        })
        .await
        .context("PDF extraction task panicked")?
        .map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read text from '{file_name}': {e}"))
        })?,
    };

    info!(
        "Extracted {} chars from upload '{file_name}' ({kind:?})",
        text.chars().count()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_by_extension() {
        assert_eq!(detect_kind("statement.txt"), Some(UploadKind::PlainText));
        assert_eq!(detect_kind("Statement.MD"), Some(UploadKind::PlainText));
        assert_eq!(detect_kind("final.v2.pdf"), Some(UploadKind::Pdf));
        assert_eq!(detect_kind("statement.docx"), None);
        assert_eq!(detect_kind("README"), None);
    }

    #[tokio::test]
    async fn test_extract_plain_text() {
        let text = extract_text("s.txt", Bytes::from_static(b"I grew up by the sea."))
            .await
            .unwrap();
        assert_eq!(text, "I grew up by the sea.");
    }

    #[tokio::test]
    async fn test_invalid_utf8_rejected() {
        let err = extract_text("s.txt", Bytes::from_static(&[0xff, 0xfe, 0x00]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_unsupported_type_rejected() {
        let err = extract_text("s.docx", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}

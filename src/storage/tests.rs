//! Storage Module Tests
//!
//! Validates filename hardening and the on-disk behavior of the `FileSink`.
//!
//! ## Test Scopes
//! - **Validation**: Rejects traversal segments, separators and non-PDF names.
//! - **FileSink**: Round-trips bytes, creates the directory and overwrites collisions.

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::storage::sink::{validate_filename, FileSink};
    use crate::storage::types::UploadedDocument;

    // ============================================================
    // FILENAME VALIDATION
    // ============================================================

    #[test]
    fn test_validate_accepts_plain_pdf_names() {
        assert_eq!(validate_filename("report.pdf").unwrap(), "report.pdf");
        assert_eq!(validate_filename("  Scan 01.PDF ").unwrap(), "Scan 01.PDF");
        assert_eq!(validate_filename("v1.2.final.pdf").unwrap(), "v1.2.final.pdf");
    }

    #[test]
    fn test_validate_rejects_traversal_and_separators() {
        for name in ["../etc/passwd.pdf", "a/b.pdf", "a\\b.pdf", "..", ".", ""] {
            let result = validate_filename(name);
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_rejects_non_documents() {
        assert!(validate_filename("notes.txt").is_err());
        assert!(validate_filename("pdf").is_err());
        assert!(validate_filename(".pdf").is_err());
        assert!(validate_filename(&format!("{}.pdf", "x".repeat(300))).is_err());
    }

    // ============================================================
    // FILE SINK
    // ============================================================

    #[tokio::test]
    async fn test_save_round_trips_bytes() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("uploads"));
        let bytes = b"%PDF-1.7\n\x00\x01\x02binary".to_vec();

        // ACT
        let path = sink.save(&bytes, "doc.pdf").await.unwrap();

        // ASSERT
        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), "doc.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_save_creates_nested_directory_idempotently() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");
        let sink = FileSink::new(&target);

        // ACT
        sink.save(b"one", "first.pdf").await.unwrap();
        sink.save(b"two", "second.pdf").await.unwrap();

        // ASSERT
        assert!(target.join("first.pdf").exists());
        assert!(target.join("second.pdf").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());

        // ACT
        let first = sink.save(b"old contents", "same.pdf").await.unwrap();
        let second = sink.save(b"new", "same.pdf").await.unwrap();

        // ASSERT
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_rejected_name_writes_nothing() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("never-created");
        let sink = FileSink::new(&target);

        // ACT
        let result = sink.save(b"data", "../escape.pdf").await;

        // ASSERT
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(!target.exists());
        assert!(!dir.path().join("escape.pdf").exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_io_error() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let sink = FileSink::new(&blocker);

        // ACT
        let result = sink.save(b"data", "doc.pdf").await;

        // ASSERT
        assert!(matches!(result, Err(AppError::Io { .. })));
    }

    #[tokio::test]
    async fn test_save_document_uses_its_filename() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        let doc = UploadedDocument::new("paper.pdf", b"content".to_vec());

        // ACT
        let path = sink.save_document(doc).await.unwrap();

        // ASSERT
        assert_eq!(path.file_name().unwrap(), "paper.pdf");
        assert_eq!(std::fs::read(path).unwrap(), b"content");
    }
}

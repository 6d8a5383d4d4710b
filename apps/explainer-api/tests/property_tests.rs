//! Property-based tests for explainer-api
//!
//! Covers upload validation, document ids and store eviction using proptest.

use explainer_api::api::{new_document_id, validate_upload, UploadedFile};
use explainer_api::DocumentStore;
use proptest::prelude::*;
use shared_types::{Analysis, Document};

// ============================================================
// Strategies
// ============================================================

/// Filenames that do not end in `.pdf` in any casing
fn non_pdf_filename() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,12}\\.(txt|docx|png|jpg|html)",
        "[a-z]{1,12}",
        "[a-z]{1,12}\\.pdf\\.exe",
    ]
}

/// Non-empty bytes that never contain the PDF header
fn non_pdf_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 1..512)
        .prop_filter("must not contain %PDF-", |bytes| {
            !bytes.windows(5).any(|w| w == b"%PDF-")
        })
}

fn upload(filename: &str, bytes: Vec<u8>) -> UploadedFile {
    UploadedFile {
        filename: Some(filename.to_string()),
        content_type: Some("application/pdf".to_string()),
        bytes,
    }
}

fn document(id: String) -> Document {
    Document::new(
        id,
        "lease.pdf".to_string(),
        "Tenant shall pay rent monthly.".to_string(),
        1,
        100,
        "ff".repeat(32),
    )
}

fn analysis() -> Analysis {
    Analysis {
        summary: "A lease.".to_string(),
        key_clauses: vec![],
        obligations: vec![],
        risks: vec![],
        unusual_terms: vec![],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Upload Validation
    // ============================================================

    #[test]
    fn non_pdf_names_are_invalid_file_type(name in non_pdf_filename()) {
        let err = validate_upload(&upload(&name, b"%PDF-1.7".to_vec()), 1024).unwrap_err();
        prop_assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn pdf_extension_is_case_insensitive(stem in "[a-z]{1,12}", ext in "[pP][dD][fF]") {
        let name = format!("{stem}.{ext}");
        prop_assert!(validate_upload(&upload(&name, b"%PDF-1.7".to_vec()), 1024).is_ok());
    }

    #[test]
    fn content_without_header_is_invalid_file_type(bytes in non_pdf_bytes()) {
        let err = validate_upload(&upload("lease.pdf", bytes), 1024).unwrap_err();
        prop_assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn oversized_uploads_are_rejected(extra in 1usize..2048, limit in 8usize..1024) {
        let mut bytes = b"%PDF-1.7\n".to_vec();
        bytes.resize(limit + extra, b' ');
        let err = validate_upload(&upload("lease.pdf", bytes), limit).unwrap_err();
        prop_assert_eq!(err.code(), "FILE_TOO_LARGE");
    }

    // ============================================================
    // Document IDs
    // ============================================================

    #[test]
    fn document_ids_are_prefixed_lowercase_hex(_seed in any::<u8>()) {
        let id = new_document_id();
        prop_assert!(id.starts_with("doc_"));
        prop_assert_eq!(id.len(), 36);
        prop_assert!(id[4..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    // ============================================================
    // Store Capacity
    // ============================================================

    #[test]
    fn store_keeps_only_the_newest_uploads(capacity in 1usize..8, inserts in 0usize..20) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let store = DocumentStore::new(None, capacity);
            let ids: Vec<String> = (0..inserts).map(|i| format!("doc_{i:032x}")).collect();
            for id in &ids {
                store.insert(document(id.clone()), analysis()).await;
            }

            assert_eq!(store.len().await, inserts.min(capacity));
            let kept_from = inserts.saturating_sub(capacity);
            for (i, id) in ids.iter().enumerate() {
                assert_eq!(store.get(id).await.is_some(), i >= kept_from, "id {id}");
            }
        });
    }
}

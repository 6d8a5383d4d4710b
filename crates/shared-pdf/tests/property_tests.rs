//! Property-based tests for shared-pdf
//!
//! Extraction must classify bad input as an error, never crash.

use proptest::prelude::*;
use shared_pdf::{content_digest, looks_like_pdf, ExtractError, PdfExtractor};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // ============================================================
    // Header Sniffing
    // ============================================================

    #[test]
    fn header_is_found_after_leading_junk(junk in proptest::collection::vec(b'a'..=b'z', 0..512)) {
        let mut bytes = junk;
        bytes.extend_from_slice(b"%PDF-1.7\n");
        prop_assert!(looks_like_pdf(&bytes));
    }

    #[test]
    fn garbage_after_header_is_rejected(tail in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.extend_from_slice(&tail);
        let result = PdfExtractor::default().extract(&bytes);
        let classified = matches!(
            result,
            Err(ExtractError::InvalidPdf(_))
                | Err(ExtractError::ExtractionError(_))
                | Err(ExtractError::EmptyDocument { .. })
                | Err(ExtractError::PasswordProtected)
        );
        prop_assert!(classified, "unexpected result: {:?}", result);
    }

    #[test]
    fn text_without_header_is_not_pdf(text in "[a-zA-Z0-9 .,\n]{0,400}") {
        prop_assert!(!looks_like_pdf(text.as_bytes()));
    }

    // ============================================================
    // Digest
    // ============================================================

    #[test]
    fn digest_is_64_lowercase_hex(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let digest = content_digest(&bytes);
        prop_assert_eq!(digest.len(), 64);
        prop_assert!(digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(digest, content_digest(&bytes));
    }
}

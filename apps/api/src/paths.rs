//! File-path canonicalization for stored PDF objects.

/// Canonicalizes a storage path so it carries exactly one `.pdf` suffix.
///
/// Clients and the processing worker have both produced keys like
/// `report.pdf.pdf.pdf` when re-submitting already-suffixed names. Collapses
/// any run of duplicated suffixes, then appends `.pdf` if missing.
///
/// Idempotent: `normalize_pdf_path(normalize_pdf_path(x)) == normalize_pdf_path(x)`.
pub fn normalize_pdf_path(path: &str) -> String {
    let mut trimmed = path;
    while trimmed.ends_with(".pdf.pdf") {
        trimmed = &trimmed[..trimmed.len() - 4];
    }
    if trimmed.ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_missing_suffix() {
        assert_eq!(normalize_pdf_path("a"), "a.pdf");
    }

    #[test]
    fn test_keeps_single_suffix() {
        assert_eq!(normalize_pdf_path("a.pdf"), "a.pdf");
    }

    #[test]
    fn test_collapses_duplicated_suffixes() {
        assert_eq!(normalize_pdf_path("a.pdf.pdf"), "a.pdf");
        assert_eq!(normalize_pdf_path("a.pdf.pdf.pdf"), "a.pdf");
    }

    #[test]
    fn test_preserves_directory_prefix() {
        assert_eq!(
            normalize_pdf_path("resumes/42/report.pdf.pdf"),
            "resumes/42/report.pdf"
        );
        assert_eq!(normalize_pdf_path("resumes/42/report"), "resumes/42/report.pdf");
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        // Storage keys are case sensitive; `.PDF` is a different suffix.
        assert_eq!(normalize_pdf_path("a.PDF"), "a.PDF.pdf");
    }

    #[test]
    fn test_inner_pdf_segments_untouched() {
        assert_eq!(normalize_pdf_path("my.pdf-notes.txt"), "my.pdf-notes.txt.pdf");
    }

    #[test]
    fn test_bare_suffix_run() {
        assert_eq!(normalize_pdf_path(".pdf.pdf"), ".pdf");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "a",
            "a.pdf",
            "a.pdf.pdf.pdf",
            "dir/file",
            "dir/file.pdf.pdf",
            ".pdf",
            "weird..pdf",
        ] {
            let once = normalize_pdf_path(input);
            assert_eq!(normalize_pdf_path(&once), once, "not idempotent for {input:?}");
            assert!(once.ends_with(".pdf"));
            assert!(!once.ends_with(".pdf.pdf"));
        }
    }
}

//! Export boundary — the one place a user-visible validation failure exists.
//!
//! The core hands the export pipeline a finished [`LayoutTree`]; everything
//! past that (materializing it into a printable page, driving a headless
//! browser, print-to-PDF) lives behind the [`PdfRenderer`] trait. The
//! default backend forwards the tree to an external render service over
//! HTTP.

pub mod client;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::render::LayoutTree;

/// Rejection message for an export without a name. The only validation the
/// export contract performs.
const MISSING_NAME: &str = "Personal information with name is required";

/// Pre-render validation for an export request. The renderer itself never
/// checks this; callers must.
pub fn validate_for_export(resume: &ResumeData) -> Result<(), AppError> {
    if resume.personal_info.name.trim().is_empty() {
        return Err(AppError::Validation(MISSING_NAME.to_string()));
    }
    Ok(())
}

/// Download filename derived from the person's name: whitespace runs become
/// single underscores, suffixed `_resume.pdf`.
pub fn pdf_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_gap = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            in_gap = true;
        } else {
            if in_gap && !stem.is_empty() {
                stem.push('_');
            }
            in_gap = false;
            stem.push(c);
        }
    }
    format!("{stem}_resume.pdf")
}

/// The PDF rendering backend. Implement this to swap how a laid-out tree
/// becomes bytes without touching handlers or the core.
///
/// Carried in `AppState` as `Arc<dyn PdfRenderer>`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render_pdf(&self, tree: &LayoutTree) -> Result<Vec<u8>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeData;

    #[test]
    fn test_validate_rejects_empty_name_with_message() {
        let resume = ResumeData::default();
        let err = validate_for_export(&resume).unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, MISSING_NAME),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_whitespace_only_name() {
        let mut resume = ResumeData::default();
        resume.personal_info.name = "   ".to_string();
        assert!(validate_for_export(&resume).is_err());
    }

    #[test]
    fn test_validate_accepts_any_nonempty_name() {
        let mut resume = ResumeData::default();
        resume.personal_info.name = "X".to_string();
        assert!(validate_for_export(&resume).is_ok());
    }

    #[test]
    fn test_filename_replaces_whitespace_runs() {
        assert_eq!(pdf_filename("Ada Lovelace"), "Ada_Lovelace_resume.pdf");
        assert_eq!(pdf_filename("Ada   King  Lovelace"), "Ada_King_Lovelace_resume.pdf");
        assert_eq!(pdf_filename("  Ada  "), "Ada_resume.pdf");
        assert_eq!(pdf_filename("Ada\tLovelace"), "Ada_Lovelace_resume.pdf");
    }

    #[test]
    fn test_filename_single_word() {
        assert_eq!(pdf_filename("Ada"), "Ada_resume.pdf");
    }
}

use crate::{Guide, StructuredJobDescription, StructuredResume};

/// The persistable part of the wizard.
///
/// The résumé text and file handle are deliberately absent; only the fact
/// that a résumé was selected survives a reload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardSnapshot {
    pub resume_selected: bool,
    pub description: String,
    pub company_name: String,
    pub finalized: bool,
    pub structured_resume: Option<StructuredResume>,
    pub structured_job_description: Option<StructuredJobDescription>,
    pub guide: Option<Guide>,
    pub completed_steps: Vec<usize>,
}

use std::path::PathBuf;

use thiserror::Error;

/// Opaque reference to the file the résumé text came from.
///
/// Never persisted: after a reload the holder only remembers that something
/// was selected, and the user has to attach the file again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle {
    pub file_name: String,
    pub path: PathBuf,
}

impl SourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { file_name, path }
    }
}

/// Why an action that needs user input is currently unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputMissing {
    #[error("a resume is required before continuing")]
    Resume,
    #[error("the resume file must be attached again before continuing")]
    ResumeNeedsReattach,
    #[error("a job description is required before continuing")]
    JobDescription,
}

/// Holds the raw résumé supplied in the first step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResumeInput {
    raw_text: Option<String>,
    source: Option<SourceHandle>,
    is_selected: bool,
}

impl ResumeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the holder from persisted state. The handle and text are gone.
    pub(crate) fn rehydrated(is_selected: bool) -> Self {
        Self {
            raw_text: None,
            source: None,
            is_selected,
        }
    }

    /// Stores the résumé. Blank text counts as absent; if neither text nor a
    /// source remains the holder ends up cleared.
    pub fn set_resume(&mut self, text: Option<String>, source: Option<SourceHandle>) {
        let text = text.filter(|text| !text.trim().is_empty());
        self.is_selected = text.is_some() || source.is_some();
        self.raw_text = text;
        self.source = source;
    }

    pub fn clear_resume(&mut self) {
        self.raw_text = None;
        self.source = None;
        self.is_selected = false;
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn source(&self) -> Option<&SourceHandle> {
        self.source.as_ref()
    }

    /// Selected, with text the pipeline can send.
    pub fn is_ready(&self) -> bool {
        self.is_selected && self.raw_text.is_some()
    }

    /// Selected according to persisted state, but nothing usable is attached.
    pub fn needs_reattach(&self) -> bool {
        self.is_selected && self.raw_text.is_none() && self.source.is_none()
    }

    pub(crate) fn readiness(&self) -> Result<(), InputMissing> {
        if self.is_ready() {
            Ok(())
        } else if self.is_selected {
            Err(InputMissing::ResumeNeedsReattach)
        } else {
            Err(InputMissing::Resume)
        }
    }
}

/// Holds the job description, the company name and the finalization gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobDetails {
    description: String,
    company_name: String,
    finalized: bool,
}

impl JobDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn rehydrated(description: String, company_name: String, finalized: bool) -> Self {
        Self {
            description,
            company_name,
            finalized,
        }
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn set_company_name(&mut self, text: impl Into<String>) {
        self.company_name = text.into();
    }

    /// Marks the details as confirmed. Returns `true` only on the false -> true
    /// transition.
    pub fn finalize(&mut self) -> bool {
        let changed = !self.finalized;
        self.finalized = true;
        changed
    }

    pub fn unfinalize(&mut self) {
        self.finalized = false;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Trimmed company name, `None` when blank.
    pub fn company_name_opt(&self) -> Option<&str> {
        let trimmed = self.company_name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn readiness(&self) -> Result<(), InputMissing> {
        if self.description.trim().is_empty() {
            Err(InputMissing::JobDescription)
        } else {
            Ok(())
        }
    }
}

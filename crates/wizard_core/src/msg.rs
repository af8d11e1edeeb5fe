use crate::{
    Guide, RemoteFailure, RunId, SourceHandle, StructuredJobDescription, StructuredResume,
    WizardSnapshot,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The host's route changed (direct visit, history navigation or an echo
    /// of a pushed route).
    RouteChanged(String),
    /// User supplied a résumé, as extracted text and/or a file reference.
    ResumeProvided {
        text: Option<String>,
        source: Option<SourceHandle>,
    },
    ResumeCleared,
    DescriptionChanged(String),
    CompanyNameChanged(String),
    NextClicked,
    BackClicked,
    RetryClicked,
    /// Explicit "start over" from anywhere in the wizard.
    StartOverClicked,
    /// Rehydrate from persisted state.
    Restore(WizardSnapshot),
    ResumeParsed {
        run: RunId,
        result: Result<StructuredResume, RemoteFailure>,
    },
    JobDescriptionParsed {
        run: RunId,
        result: Result<StructuredJobDescription, RemoteFailure>,
    },
    GuideGenerated {
        run: RunId,
        result: Result<Guide, RemoteFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

use crate::{GenerateRequest, Guide, RunId, WizardSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Reflect the active step in the navigable route.
    PushRoute(String),
    ParseResume {
        run: RunId,
        resume_text: String,
    },
    ParseJobDescription {
        run: RunId,
        description: String,
        company_name: Option<String>,
    },
    GenerateGuide {
        run: RunId,
        request: GenerateRequest,
    },
    /// The run was reset away; its late completion will be discarded anyway.
    AbandonRun { run: RunId },
    PersistSnapshot(WizardSnapshot),
    ExportGuide(Guide),
}

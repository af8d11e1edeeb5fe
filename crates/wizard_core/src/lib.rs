//! Wizard core: pure state machine for the interview prep wizard.
//!
//! Holds the résumé and job-details inputs, the three-call generation
//! pipeline, the step navigator and the persistable snapshot. No IO happens
//! here; the host feeds [`Msg`]s into [`update`] and executes the returned
//! [`Effect`]s.
mod effect;
mod guide;
mod input;
mod msg;
mod navigator;
mod pipeline;
mod snapshot;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use guide::{Guide, GuideSection, StructuredJobDescription, StructuredResume};
pub use input::{InputMissing, JobDetails, ResumeInput, SourceHandle};
pub use msg::Msg;
pub use navigator::{
    parse_route, Location, RouteTarget, SessionEntryMarker, StepNavigator, Visit, WizardStep,
    STEP_COUNT, STEP_ROUTE_PREFIX, WIZARD_ROOT,
};
pub use pipeline::{
    FailureCause, GenerateRequest, Orchestrator, ParseStage, Phase, PipelineFailure,
    PipelineStatus, RemoteFailure, RunId,
};
pub use snapshot::WizardSnapshot;
pub use state::WizardState;
pub use update::update;
pub use view_model::{StepView, WizardView};

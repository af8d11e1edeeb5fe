use std::fmt;

use thiserror::Error;
use wizard_logging::{wizard_debug, wizard_error, wizard_info, wizard_warn};

use crate::{Effect, Guide, JobDetails, ResumeInput, StructuredJobDescription, StructuredResume};

/// Monotonic tag for one pass through the three remote calls.
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    Resume,
    JobDescription,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Resume => write!(f, "resume"),
            ParseStage::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidBody,
}

/// A failed remote call as reported by the host, before the pipeline knows
/// which stage it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub cause: FailureCause,
    pub message: String,
}

impl RemoteFailure {
    pub fn new(cause: FailureCause, message: impl Into<String>) -> Self {
        Self {
            cause,
            message: message.into(),
        }
    }
}

/// Terminal pipeline error. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineFailure {
    #[error("{stage} parsing failed: {message}")]
    Parse {
        stage: ParseStage,
        cause: FailureCause,
        message: String,
    },
    #[error("guide generation failed: {message}")]
    Generation { cause: FailureCause, message: String },
}

impl PipelineFailure {
    fn parse(stage: ParseStage, failure: RemoteFailure) -> Self {
        PipelineFailure::Parse {
            stage,
            cause: failure.cause,
            message: failure.message,
        }
    }

    fn generation(failure: RemoteFailure) -> Self {
        PipelineFailure::Generation {
            cause: failure.cause,
            message: failure.message,
        }
    }

    pub fn cause(&self) -> &FailureCause {
        match self {
            PipelineFailure::Parse { cause, .. } | PipelineFailure::Generation { cause, .. } => {
                cause
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        *self.cause() == FailureCause::Timeout
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineStatus {
    #[default]
    Idle,
    ParsingResume,
    ParsingJobDescription,
    GeneratingGuide,
    Succeeded,
    Failed(PipelineFailure),
}

impl PipelineStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            PipelineStatus::ParsingResume
                | PipelineStatus::ParsingJobDescription
                | PipelineStatus::GeneratingGuide
        )
    }

    pub fn phase(&self) -> Phase {
        match self {
            PipelineStatus::Idle => Phase::Waiting,
            PipelineStatus::ParsingResume => Phase::ParsingResume,
            PipelineStatus::ParsingJobDescription => Phase::ParsingJobDescription,
            PipelineStatus::GeneratingGuide => Phase::GeneratingGuide,
            PipelineStatus::Succeeded => Phase::Ready,
            PipelineStatus::Failed(_) => Phase::Failed,
        }
    }

    pub fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            PipelineStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Coarse status used to pick a loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Waiting,
    ParsingResume,
    ParsingJobDescription,
    GeneratingGuide,
    Ready,
    Failed,
}

/// Body of the generate call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub resume_structured: StructuredResume,
    pub jd_structured: StructuredJobDescription,
    pub raw_resume_text: String,
    pub job_description: String,
    pub company_name: Option<String>,
}

/// Inputs captured when a run starts; every stage of that run uses them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunInputs {
    resume_text: String,
    description: String,
    company_name: Option<String>,
}

/// Drives parse résumé -> parse job description -> generate guide.
///
/// Only this type writes `PipelineStatus` and the structured records. A run
/// starts on the rising edge of the input gate (résumé ready and job details
/// finalized) or on an explicit retry, never while another call is in flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Orchestrator {
    status: PipelineStatus,
    run: RunId,
    gate_open: bool,
    inputs: Option<RunInputs>,
    structured_resume: Option<StructuredResume>,
    structured_job_description: Option<StructuredJobDescription>,
    guide: Option<Guide>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &PipelineStatus {
        &self.status
    }

    pub fn current_run(&self) -> RunId {
        self.run
    }

    pub fn guide(&self) -> Option<&Guide> {
        self.guide.as_ref()
    }

    pub fn structured_resume(&self) -> Option<&StructuredResume> {
        self.structured_resume.as_ref()
    }

    pub fn structured_job_description(&self) -> Option<&StructuredJobDescription> {
        self.structured_job_description.as_ref()
    }

    /// Records the current gate value and starts a run on its false -> true edge.
    pub(crate) fn observe_gate(
        &mut self,
        resume: &ResumeInput,
        job: &JobDetails,
    ) -> Option<Effect> {
        let gate = resume.is_ready() && job.is_finalized();
        let rising = gate && !self.gate_open;
        self.gate_open = gate;
        if !rising {
            return None;
        }
        if self.status != PipelineStatus::Idle {
            wizard_debug!(
                "Input gate opened while pipeline is {:?}; not starting",
                self.status
            );
            return None;
        }
        self.start_run(resume, job)
    }

    /// Clears a failure and re-runs the whole sequence when the inputs allow it.
    pub(crate) fn retry(&mut self, resume: &ResumeInput, job: &JobDetails) -> Option<Effect> {
        if !matches!(self.status, PipelineStatus::Failed(_)) {
            wizard_debug!("Retry ignored while pipeline is {:?}", self.status);
            return None;
        }
        self.status = PipelineStatus::Idle;
        wizard_info!("Retry requested after failure in run {}", self.run);
        if !(resume.is_ready() && job.is_finalized()) {
            wizard_warn!("Retry deferred: inputs are not ready");
            return None;
        }
        self.start_run(resume, job)
    }

    fn start_run(&mut self, resume: &ResumeInput, job: &JobDetails) -> Option<Effect> {
        if !matches!(self.status, PipelineStatus::Idle | PipelineStatus::Failed(_)) {
            wizard_warn!("Refusing to start a run while pipeline is {:?}", self.status);
            return None;
        }
        let resume_text = resume.raw_text()?.to_owned();
        let inputs = RunInputs {
            resume_text: resume_text.clone(),
            description: job.description().to_owned(),
            company_name: job.company_name_opt().map(ToOwned::to_owned),
        };

        self.run += 1;
        self.inputs = Some(inputs);
        self.structured_resume = None;
        self.structured_job_description = None;
        self.guide = None;
        self.status = PipelineStatus::ParsingResume;
        wizard_info!("Run {}: parsing resume ({} chars)", self.run, resume_text.len());

        Some(Effect::ParseResume {
            run: self.run,
            resume_text,
        })
    }

    pub(crate) fn on_resume_parsed(
        &mut self,
        run: RunId,
        result: Result<StructuredResume, RemoteFailure>,
    ) -> Option<Effect> {
        if self.is_stale(run, &PipelineStatus::ParsingResume) {
            return None;
        }
        match result {
            Ok(structured) => {
                let inputs = self.inputs.clone()?;
                self.structured_resume = Some(structured);
                self.status = PipelineStatus::ParsingJobDescription;
                wizard_info!("Run {}: resume parsed, parsing job description", run);
                Some(Effect::ParseJobDescription {
                    run,
                    description: inputs.description,
                    company_name: inputs.company_name,
                })
            }
            Err(failure) => {
                self.fail(PipelineFailure::parse(ParseStage::Resume, failure));
                None
            }
        }
    }

    pub(crate) fn on_job_description_parsed(
        &mut self,
        run: RunId,
        result: Result<StructuredJobDescription, RemoteFailure>,
    ) -> Option<Effect> {
        if self.is_stale(run, &PipelineStatus::ParsingJobDescription) {
            return None;
        }
        match result {
            Ok(structured) => {
                self.structured_job_description = Some(structured);
                let Some(request) = self.generate_request() else {
                    wizard_error!("Run {}: structured records missing before generation", run);
                    return None;
                };
                self.status = PipelineStatus::GeneratingGuide;
                wizard_info!("Run {}: job description parsed, generating guide", run);
                Some(Effect::GenerateGuide { run, request })
            }
            Err(failure) => {
                self.fail(PipelineFailure::parse(ParseStage::JobDescription, failure));
                None
            }
        }
    }

    /// Returns `true` when the guide was published.
    pub(crate) fn on_guide_generated(
        &mut self,
        run: RunId,
        result: Result<Guide, RemoteFailure>,
    ) -> bool {
        if self.is_stale(run, &PipelineStatus::GeneratingGuide) {
            return false;
        }
        match result {
            Ok(guide) => {
                wizard_info!(
                    "Run {}: guide ready with {} sections",
                    run,
                    guide.available_sections().len()
                );
                self.guide = Some(guide);
                self.status = PipelineStatus::Succeeded;
                true
            }
            Err(failure) => {
                self.fail(PipelineFailure::generation(failure));
                false
            }
        }
    }

    /// Drops everything. Returns the run that was in flight, if any, so the
    /// host can abandon it. The run counter keeps counting.
    pub(crate) fn reset(&mut self) -> Option<RunId> {
        let abandoned = self.status.is_in_flight().then_some(self.run);
        *self = Self {
            run: self.run,
            ..Self::default()
        };
        abandoned
    }

    pub(crate) fn restore(
        &mut self,
        structured_resume: Option<StructuredResume>,
        structured_job_description: Option<StructuredJobDescription>,
        guide: Option<Guide>,
    ) {
        self.status = if guide.is_some() {
            PipelineStatus::Succeeded
        } else {
            PipelineStatus::Idle
        };
        self.inputs = None;
        self.gate_open = false;
        self.structured_resume = structured_resume;
        self.structured_job_description = structured_job_description;
        self.guide = guide;
    }

    fn generate_request(&self) -> Option<GenerateRequest> {
        let inputs = self.inputs.as_ref()?;
        Some(GenerateRequest {
            resume_structured: self.structured_resume.clone()?,
            jd_structured: self.structured_job_description.clone()?,
            raw_resume_text: inputs.resume_text.clone(),
            job_description: inputs.description.clone(),
            company_name: inputs.company_name.clone(),
        })
    }

    fn is_stale(&self, run: RunId, expected: &PipelineStatus) -> bool {
        if run != self.run || &self.status != expected {
            wizard_debug!(
                "Discarding stale response for run {} (current run {}, status {:?})",
                run,
                self.run,
                self.status
            );
            return true;
        }
        false
    }

    fn fail(&mut self, failure: PipelineFailure) {
        wizard_warn!("Run {} failed: {}", self.run, failure);
        self.status = PipelineStatus::Failed(failure);
    }
}

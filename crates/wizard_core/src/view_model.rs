use crate::{
    Guide, GuideSection, InputMissing, Location, Phase, PipelineStatus, WizardState, WizardStep,
    STEP_COUNT,
};

/// What the active screen should show. A pure function of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView {
    /// No route reported yet.
    NotStarted,
    ResumeUpload,
    JobDetails,
    /// A guide step before the guide exists: loading indicator for `phase`.
    Preparing { phase: Phase },
    /// A guide step after the pipeline failed: message plus "Try Again".
    Failed { message: String },
    Section {
        section: GuideSection,
        available: bool,
    },
    Invalid { requested: String },
}

/// Read-only snapshot handed to display code.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    pub location: Location,
    pub current_step: Option<usize>,
    pub step: StepView,
    pub pipeline: PipelineStatus,
    pub phase: Phase,
    pub guide: Option<Guide>,
    pub last_error: Option<String>,
    pub can_advance: bool,
    pub can_go_back: bool,
    pub can_retry: bool,
    /// Set after an advance attempt was refused for missing input.
    pub advance_blocked: Option<InputMissing>,
    pub resume_selected: bool,
    pub resume_needs_reattach: bool,
    pub job_details_finalized: bool,
    pub completed_steps: Vec<usize>,
    pub progress_percent: u8,
}

impl WizardState {
    pub fn view(&self) -> WizardView {
        let location = self.location().clone();
        let current = location.step();
        let status = self.pipeline.status().clone();
        let completed_steps = self.completed_steps();

        WizardView {
            step: step_view(&location, &status, self.pipeline.guide()),
            current_step: current.map(WizardStep::index),
            phase: status.phase(),
            last_error: status.failure().map(ToString::to_string),
            can_advance: current.is_some_and(|step| self.advance_guard(step).is_ok()),
            can_go_back: current.is_some_and(|step| step.prev().is_some()),
            can_retry: matches!(status, PipelineStatus::Failed(_)),
            advance_blocked: self.blocked,
            resume_selected: self.resume.is_selected(),
            resume_needs_reattach: self.resume.needs_reattach(),
            job_details_finalized: self.job.is_finalized(),
            progress_percent: progress_percent(completed_steps.len()),
            completed_steps,
            guide: self.pipeline.guide().cloned(),
            pipeline: status,
            location,
        }
    }
}

fn step_view(location: &Location, status: &PipelineStatus, guide: Option<&Guide>) -> StepView {
    let step = match location {
        Location::Unvisited => return StepView::NotStarted,
        Location::Invalid(requested) => {
            return StepView::Invalid {
                requested: requested.clone(),
            }
        }
        Location::Step(step) => *step,
    };

    let Some(section) = step.guide_section() else {
        return if step == WizardStep::RESUME_UPLOAD {
            StepView::ResumeUpload
        } else {
            StepView::JobDetails
        };
    };

    match (guide, status) {
        (Some(guide), _) => StepView::Section {
            section,
            available: guide.section(section).is_some(),
        },
        (None, PipelineStatus::Failed(failure)) => StepView::Failed {
            message: failure.to_string(),
        },
        (None, status) => StepView::Preparing {
            phase: status.phase(),
        },
    }
}

fn progress_percent(completed: usize) -> u8 {
    let percent = (completed.min(STEP_COUNT) * 100 + STEP_COUNT / 2) / STEP_COUNT;
    percent as u8
}

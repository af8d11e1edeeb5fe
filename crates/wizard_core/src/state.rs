use std::collections::BTreeSet;

use wizard_logging::{wizard_debug, wizard_info};

use crate::navigator::{RouteTarget, Visit};
use crate::{
    Effect, InputMissing, JobDetails, Location, Orchestrator, ResumeInput, StepNavigator,
    WizardSnapshot, WizardStep, STEP_COUNT,
};

/// The whole wizard: both holders, the orchestrator, the navigator and the
/// progress record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub(crate) resume: ResumeInput,
    pub(crate) job: JobDetails,
    pub(crate) pipeline: Orchestrator,
    pub(crate) navigator: StepNavigator,
    pub(crate) completed_steps: BTreeSet<usize>,
    pub(crate) blocked: Option<InputMissing>,
    dirty: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume(&self) -> &ResumeInput {
        &self.resume
    }

    pub fn job_details(&self) -> &JobDetails {
        &self.job
    }

    pub fn pipeline(&self) -> &Orchestrator {
        &self.pipeline
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn completed_steps(&self) -> Vec<usize> {
        self.completed_steps.iter().copied().collect()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            resume_selected: self.resume.is_selected(),
            description: self.job.description().to_owned(),
            company_name: self.job.company_name().to_owned(),
            finalized: self.job.is_finalized(),
            structured_resume: self.pipeline.structured_resume().cloned(),
            structured_job_description: self.pipeline.structured_job_description().cloned(),
            guide: self.pipeline.guide().cloned(),
            completed_steps: self.completed_steps(),
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Why advancing from `step` is not possible right now, if it is not.
    pub(crate) fn advance_guard(&self, step: WizardStep) -> Result<(), InputMissing> {
        if step == WizardStep::RESUME_UPLOAD {
            self.resume.readiness()
        } else if step == WizardStep::JOB_DETAILS {
            self.resume.readiness()?;
            self.job.readiness()
        } else {
            Ok(())
        }
    }

    pub(crate) fn visit(&mut self, target: RouteTarget) -> Vec<Effect> {
        let visit = self.navigator.visit(target);
        self.mark_dirty();
        match visit {
            Visit::Invalid => Vec::new(),
            Visit::Step {
                step,
                previous,
                fresh_entry,
                ..
            } => {
                let mut effects = Vec::new();
                if fresh_entry {
                    effects.extend(self.reset());
                }
                // Only a move from another step counts; the first route after
                // a reload keeps the saved finalization.
                let returned = previous.is_some_and(|from| from != step);
                if returned && step == WizardStep::JOB_DETAILS && self.job.is_finalized() {
                    wizard_debug!("Returned to job details; unfinalizing");
                    self.job.unfinalize();
                }
                effects
            }
        }
    }

    pub(crate) fn advance(&mut self) -> Vec<Effect> {
        let Some(step) = self.navigator.current_step() else {
            return Vec::new();
        };
        if let Err(missing) = self.advance_guard(step) {
            wizard_debug!("Advance from step {} blocked: {}", step.index(), missing);
            self.blocked = Some(missing);
            self.mark_dirty();
            return Vec::new();
        }
        self.blocked = None;

        let Some(next) = step.next() else {
            return match self.pipeline.guide() {
                Some(guide) => {
                    let guide = guide.clone();
                    self.completed_steps.insert(step.index());
                    self.mark_dirty();
                    vec![Effect::ExportGuide(guide)]
                }
                None => Vec::new(),
            };
        };

        self.completed_steps.insert(step.index());
        if step == WizardStep::JOB_DETAILS && self.job.finalize() {
            wizard_info!("Job details finalized");
        }
        let mut effects = vec![Effect::PushRoute(next.route())];
        effects.extend(self.visit(RouteTarget::Step(next)));
        effects
    }

    pub(crate) fn back(&mut self) -> Vec<Effect> {
        let Some(prev) = self.navigator.current_step().and_then(WizardStep::prev) else {
            return Vec::new();
        };
        self.blocked = None;
        let mut effects = vec![Effect::PushRoute(prev.route())];
        effects.extend(self.visit(RouteTarget::Step(prev)));
        effects
    }

    /// Explicit start-over: reset, then land on step 0.
    pub(crate) fn start_over(&mut self) -> Vec<Effect> {
        let mut effects = self.reset();
        self.navigator.restart();
        effects.push(Effect::PushRoute(WizardStep::RESUME_UPLOAD.route()));
        effects
    }

    /// Clears every holder, the pipeline and progress in one step.
    pub(crate) fn reset(&mut self) -> Vec<Effect> {
        let abandoned = self.pipeline.reset();
        self.resume.clear_resume();
        self.job = JobDetails::new();
        self.completed_steps.clear();
        self.blocked = None;
        self.mark_dirty();
        wizard_info!("Wizard reset");

        abandoned
            .map(|run| Effect::AbandonRun { run })
            .into_iter()
            .collect()
    }

    pub(crate) fn restore(&mut self, snapshot: WizardSnapshot) {
        if self.pipeline.status().is_in_flight() {
            wizard_debug!("Ignoring restore while a run is in flight");
            return;
        }
        self.resume = ResumeInput::rehydrated(snapshot.resume_selected);
        self.job = JobDetails::rehydrated(
            snapshot.description,
            snapshot.company_name,
            snapshot.finalized,
        );
        self.pipeline.restore(
            snapshot.structured_resume,
            snapshot.structured_job_description,
            snapshot.guide,
        );
        self.completed_steps = snapshot
            .completed_steps
            .into_iter()
            .filter(|index| *index < STEP_COUNT)
            .collect();
        self.blocked = None;
        self.mark_dirty();
        wizard_info!("Wizard state restored");
    }

    pub(crate) fn location(&self) -> &Location {
        self.navigator.location()
    }
}

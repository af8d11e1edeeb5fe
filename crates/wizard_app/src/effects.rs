use std::time::Duration;

use wizard_core::{
    Effect, FailureCause, GenerateRequest, Guide, Msg, RemoteFailure, StructuredJobDescription,
    StructuredResume,
};
use wizard_engine::{
    EngineError, EngineEvent, EngineHandle, FailureKind, GuideRequest, RemoteError,
};
use wizard_logging::{wizard_info, wizard_warn};

/// What the host must do itself after the engine took its share of the effects.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Navigate(String),
    Persist(wizard_core::WizardSnapshot),
    Export(Guide),
}

/// Hands remote work to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<HostAction> {
        let mut actions = Vec::new();
        for effect in effects {
            match effect {
                Effect::ParseResume { run, resume_text } => {
                    wizard_info!("ParseResume run={} text_len={}", run, resume_text.len());
                    self.engine.parse_resume(run, resume_text);
                }
                Effect::ParseJobDescription {
                    run,
                    description,
                    company_name,
                } => {
                    wizard_info!(
                        "ParseJobDescription run={} text_len={} company={:?}",
                        run,
                        description.len(),
                        company_name
                    );
                    self.engine
                        .parse_job_description(run, description, company_name);
                }
                Effect::GenerateGuide { run, request } => {
                    wizard_info!("GenerateGuide run={}", run);
                    self.engine.generate_guide(run, guide_request(request));
                }
                Effect::AbandonRun { run } => self.engine.abandon(run),
                Effect::PushRoute(path) => actions.push(HostAction::Navigate(path)),
                Effect::PersistSnapshot(snapshot) => actions.push(HostAction::Persist(snapshot)),
                Effect::ExportGuide(guide) => actions.push(HostAction::Export(guide)),
            }
        }
        actions
    }

    /// Waits up to `timeout` for the next adapter completion.
    pub fn next_message(&self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.recv_timeout(timeout)?.map(event_to_msg))
    }
}

fn guide_request(request: GenerateRequest) -> GuideRequest {
    GuideRequest {
        resume_structured: request.resume_structured.0,
        jd_structured: request.jd_structured.0,
        company_name: request.company_name,
        job_description: request.job_description,
        raw_resume_text: request.raw_resume_text,
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ResumeParsed { run, result } => Msg::ResumeParsed {
            run,
            result: result.map(StructuredResume).map_err(remote_failure),
        },
        EngineEvent::JobDescriptionParsed { run, result } => Msg::JobDescriptionParsed {
            run,
            result: result.map(StructuredJobDescription).map_err(remote_failure),
        },
        EngineEvent::GuideGenerated { run, result } => Msg::GuideGenerated {
            run,
            result: result.map_err(remote_failure).and_then(|value| {
                Guide::from_value(value).map_err(|err| {
                    wizard_warn!("Run {} returned an unusable guide: {}", run, err);
                    RemoteFailure::new(FailureCause::InvalidBody, err.to_string())
                })
            }),
        },
    }
}

fn remote_failure(err: RemoteError) -> RemoteFailure {
    let cause = match err.kind {
        FailureKind::HttpStatus(code) => FailureCause::HttpStatus(code),
        FailureKind::Timeout => FailureCause::Timeout,
        FailureKind::Network => FailureCause::Network,
        FailureKind::InvalidBody => FailureCause::InvalidBody,
    };
    RemoteFailure::new(cause, err.message)
}

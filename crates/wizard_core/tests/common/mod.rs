#![allow(dead_code)]

use std::sync::Once;

use serde_json::json;
use wizard_core::{
    update, Effect, FailureCause, Guide, Msg, RemoteFailure, StructuredJobDescription,
    StructuredResume, WizardState,
};

pub const RESUME_TEXT: &str = "John Doe, 5 years backend experience";
pub const JOB_DESCRIPTION: &str = "Senior Backend Engineer at Acme";
pub const COMPANY: &str = "Acme";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(wizard_logging::initialize_for_tests);
}

pub fn route(step: usize) -> String {
    format!("/interview-v2/step/{step}")
}

pub fn send(state: WizardState, msg: Msg) -> (WizardState, Vec<Effect>) {
    update(state, msg)
}

/// Effects other than persistence, which most tests do not care about.
pub fn work(effects: Vec<Effect>) -> Vec<Effect> {
    effects
        .into_iter()
        .filter(|effect| !matches!(effect, Effect::PersistSnapshot(_)))
        .collect()
}

pub fn provide_resume(state: WizardState, text: &str) -> WizardState {
    send(
        state,
        Msg::ResumeProvided {
            text: Some(text.to_string()),
            source: None,
        },
    )
    .0
}

/// Fresh session, résumé uploaded, job details typed, sitting on step 1.
pub fn at_job_details() -> WizardState {
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(0)));
    let state = provide_resume(state, RESUME_TEXT);
    let (state, _) = send(state, Msg::NextClicked);
    let (state, _) = send(state, Msg::DescriptionChanged(JOB_DESCRIPTION.to_string()));
    let (state, _) = send(state, Msg::CompanyNameChanged(COMPANY.to_string()));
    state
}

pub fn structured_resume() -> StructuredResume {
    StructuredResume(json!({"name": "John Doe", "years_experience": 5}))
}

pub fn structured_jd() -> StructuredJobDescription {
    StructuredJobDescription(json!({"role_title": "Senior Backend Engineer", "company": "Acme"}))
}

pub fn guide() -> Guide {
    Guide::from_value(json!({
        "section_0_welcome": {"introduction": "Welcome, John"},
        "section_1_company_industry": {"company_overview": "Acme makes anvils"},
        "section_5_star_story_bank": {"stories": []}
    }))
    .expect("guide fixture")
}

pub fn server_error() -> RemoteFailure {
    RemoteFailure::new(FailureCause::HttpStatus(500), "Internal Server Error")
}

/// Drives a started run to success.
pub fn complete_run(state: WizardState, run: u64) -> (WizardState, Vec<Effect>) {
    let (state, _) = send(
        state,
        Msg::ResumeParsed {
            run,
            result: Ok(structured_resume()),
        },
    );
    let (state, _) = send(
        state,
        Msg::JobDescriptionParsed {
            run,
            result: Ok(structured_jd()),
        },
    );
    send(
        state,
        Msg::GuideGenerated {
            run,
            result: Ok(guide()),
        },
    )
}

/// Adapter calls in issue order, with the run id stripped.
pub fn adapter_calls(effects: &[Effect]) -> Vec<&'static str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ParseResume { .. } => Some("parse-resume"),
            Effect::ParseJobDescription { .. } => Some("parse-jd"),
            Effect::GenerateGuide { .. } => Some("generate"),
            _ => None,
        })
        .collect()
}

mod common;

use common::*;
use pretty_assertions::assert_eq;
use wizard_core::{
    Effect, FailureCause, GenerateRequest, Msg, ParseStage, Phase, PipelineFailure,
    PipelineStatus, RemoteFailure, StepView, WizardState,
};

fn finalize(state: WizardState) -> (WizardState, Vec<Effect>) {
    send(state, Msg::NextClicked)
}

/// Runs to the point where the job description parse failed with HTTP 500.
fn scenario_b() -> WizardState {
    let (state, _) = finalize(at_job_details());
    let (state, _) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    let (state, effects) = send(
        state,
        Msg::JobDescriptionParsed {
            run: 1,
            result: Err(server_error()),
        },
    );
    assert!(work(effects).is_empty());
    state
}

#[test]
fn scenario_a_three_calls_in_order_reach_succeeded() {
    init_logging();
    let (state, effects) = finalize(at_job_details());
    assert_eq!(
        work(effects),
        vec![
            Effect::PushRoute(route(2)),
            Effect::ParseResume {
                run: 1,
                resume_text: RESUME_TEXT.to_string(),
            },
        ]
    );
    assert_eq!(state.pipeline().status(), &PipelineStatus::ParsingResume);

    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    assert_eq!(
        work(effects),
        vec![Effect::ParseJobDescription {
            run: 1,
            description: JOB_DESCRIPTION.to_string(),
            company_name: Some(COMPANY.to_string()),
        }]
    );
    assert_eq!(
        state.pipeline().status(),
        &PipelineStatus::ParsingJobDescription
    );

    let (state, effects) = send(
        state,
        Msg::JobDescriptionParsed {
            run: 1,
            result: Ok(structured_jd()),
        },
    );
    assert_eq!(
        work(effects),
        vec![Effect::GenerateGuide {
            run: 1,
            request: GenerateRequest {
                resume_structured: structured_resume(),
                jd_structured: structured_jd(),
                raw_resume_text: RESUME_TEXT.to_string(),
                job_description: JOB_DESCRIPTION.to_string(),
                company_name: Some(COMPANY.to_string()),
            },
        }]
    );
    assert_eq!(state.pipeline().status(), &PipelineStatus::GeneratingGuide);

    let (state, effects) = send(
        state,
        Msg::GuideGenerated {
            run: 1,
            result: Ok(guide()),
        },
    );
    assert_eq!(state.pipeline().status(), &PipelineStatus::Succeeded);
    assert_eq!(state.pipeline().guide(), Some(&guide()));

    let persisted = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::PersistSnapshot(snapshot) => Some(snapshot),
            _ => None,
        })
        .expect("guide is persisted");
    assert_eq!(persisted.guide, Some(guide()));

    let view = state.view();
    assert_eq!(view.phase, Phase::Ready);
    assert_eq!(view.last_error, None);
}

#[test]
fn scenario_b_jd_failure_keeps_structured_resume_only() {
    init_logging();
    let state = scenario_b();

    assert_eq!(
        state.pipeline().status(),
        &PipelineStatus::Failed(PipelineFailure::Parse {
            stage: ParseStage::JobDescription,
            cause: FailureCause::HttpStatus(500),
            message: "Internal Server Error".to_string(),
        })
    );
    assert!(state.pipeline().guide().is_none());
    assert!(state.pipeline().structured_job_description().is_none());
    assert_eq!(
        state.pipeline().structured_resume(),
        Some(&structured_resume())
    );

    let view = state.view();
    assert!(view.can_retry);
    assert_eq!(
        view.last_error.as_deref(),
        Some("job description parsing failed: Internal Server Error")
    );
    assert_eq!(
        view.step,
        StepView::Failed {
            message: "job description parsing failed: Internal Server Error".to_string()
        }
    );
}

#[test]
fn scenario_c_retry_reruns_whole_sequence() {
    init_logging();
    let state = scenario_b();

    let (state, effects) = send(state, Msg::RetryClicked);
    assert_eq!(
        work(effects),
        vec![Effect::ParseResume {
            run: 2,
            resume_text: RESUME_TEXT.to_string(),
        }]
    );
    assert_eq!(state.pipeline().status(), &PipelineStatus::ParsingResume);
    assert!(state.pipeline().structured_resume().is_none());
    assert_eq!(state.view().last_error, None);

    let (state, _) = complete_run(state, 2);
    assert_eq!(state.pipeline().status(), &PipelineStatus::Succeeded);
    assert!(state.pipeline().guide().is_some());
}

#[test]
fn retry_with_unchanged_inputs_repeats_the_same_calls() {
    init_logging();
    let (state, first) = finalize(at_job_details());
    let mut first_calls = work(first);
    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    first_calls.extend(work(effects));
    let (state, effects) = send(
        state,
        Msg::JobDescriptionParsed {
            run: 1,
            result: Ok(structured_jd()),
        },
    );
    first_calls.extend(work(effects));
    let (state, _) = send(
        state,
        Msg::GuideGenerated {
            run: 1,
            result: Err(server_error()),
        },
    );

    let (state, effects) = send(state, Msg::RetryClicked);
    let mut second_calls = work(effects);
    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 2,
            result: Ok(structured_resume()),
        },
    );
    second_calls.extend(work(effects));
    let (_state, effects) = send(
        state,
        Msg::JobDescriptionParsed {
            run: 2,
            result: Ok(structured_jd()),
        },
    );
    second_calls.extend(work(effects));

    assert_eq!(
        adapter_calls(&first_calls),
        vec!["parse-resume", "parse-jd", "generate"]
    );
    assert_eq!(adapter_calls(&first_calls), adapter_calls(&second_calls));
}

#[test]
fn scenario_d_reset_discards_late_generation() {
    init_logging();
    let (state, _) = finalize(at_job_details());
    let (state, _) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    let (state, _) = send(
        state,
        Msg::JobDescriptionParsed {
            run: 1,
            result: Ok(structured_jd()),
        },
    );
    assert_eq!(state.pipeline().status(), &PipelineStatus::GeneratingGuide);

    let (state, effects) = send(state, Msg::RouteChanged(route(0)));
    assert_eq!(work(effects), vec![Effect::AbandonRun { run: 1 }]);
    assert_eq!(state.pipeline().status(), &PipelineStatus::Idle);
    assert!(!state.resume().is_selected());
    assert!(!state.job_details().is_finalized());
    assert!(state.pipeline().structured_resume().is_none());

    let before = state.clone();
    let (state, effects) = send(
        state,
        Msg::GuideGenerated {
            run: 1,
            result: Ok(guide()),
        },
    );
    assert!(effects.is_empty());
    assert!(state.pipeline().guide().is_none());
    assert_eq!(state.pipeline().status(), &PipelineStatus::Idle);
    assert_eq!(state.snapshot(), before.snapshot());
}

#[test]
fn older_run_completion_is_ignored_while_newer_run_waits() {
    init_logging();
    let (state, effects) = finalize(at_job_details());
    assert_eq!(adapter_calls(&effects), vec!["parse-resume"]);

    let (state, _) = send(state, Msg::StartOverClicked);
    let (state, _) = send(state, Msg::RouteChanged(route(0)));
    let state = provide_resume(state, RESUME_TEXT);
    let (state, _) = send(state, Msg::NextClicked);
    let (state, _) = send(state, Msg::DescriptionChanged(JOB_DESCRIPTION.to_string()));
    let (state, effects) = finalize(state);
    assert_eq!(
        work(effects),
        vec![
            Effect::PushRoute(route(2)),
            Effect::ParseResume {
                run: 2,
                resume_text: RESUME_TEXT.to_string(),
            },
        ]
    );
    assert_eq!(state.pipeline().status(), &PipelineStatus::ParsingResume);

    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    assert!(adapter_calls(&effects).is_empty());
    assert_eq!(state.pipeline().status(), &PipelineStatus::ParsingResume);
    assert!(state.pipeline().structured_resume().is_none());

    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 2,
            result: Ok(structured_resume()),
        },
    );
    assert_eq!(adapter_calls(&effects), vec!["parse-jd"]);
    assert_eq!(
        state.pipeline().status(),
        &PipelineStatus::ParsingJobDescription
    );
}

#[test]
fn editing_inputs_without_finalize_never_starts_a_run() {
    init_logging();
    let (mut state, _) = send(WizardState::new(), Msg::RouteChanged(route(0)));
    let mut all = Vec::new();
    let edits = [
        Msg::DescriptionChanged("Platform engineer".to_string()),
        Msg::ResumeProvided {
            text: Some(RESUME_TEXT.to_string()),
            source: None,
        },
        Msg::CompanyNameChanged("Initech".to_string()),
        Msg::DescriptionChanged(JOB_DESCRIPTION.to_string()),
        Msg::ResumeProvided {
            text: Some("Jane Roe, data engineer".to_string()),
            source: None,
        },
        Msg::CompanyNameChanged(COMPANY.to_string()),
    ];
    for msg in edits {
        let (next, effects) = send(state, msg);
        all.extend(effects);
        state = next;
        assert!(!state.job_details().is_finalized());
        assert_eq!(state.pipeline().status(), &PipelineStatus::Idle);
    }
    let (state, effects) = send(state, Msg::NextClicked);
    all.extend(effects);
    assert_eq!(state.view().current_step, Some(1));

    assert!(adapter_calls(&all).is_empty());
}

#[test]
fn repeated_finalize_never_overlaps_runs() {
    init_logging();
    let (state, effects) = finalize(at_job_details());
    let mut all = effects;

    // Back to job details and forward again while the first call is in flight.
    let mut state = state;
    for _ in 0..3 {
        let (next, effects) = send(state, Msg::BackClicked);
        all.extend(effects);
        let (next, effects) = send(next, Msg::NextClicked);
        all.extend(effects);
        let (next, effects) = send(next, Msg::RetryClicked);
        all.extend(effects);
        state = next;
        assert_eq!(state.pipeline().status(), &PipelineStatus::ParsingResume);
    }

    assert_eq!(adapter_calls(&all), vec!["parse-resume"]);
    assert_eq!(state.pipeline().current_run(), 1);
}

#[test]
fn duplicate_completion_for_the_same_stage_is_ignored() {
    init_logging();
    let (state, _) = finalize(at_job_details());
    let (state, _) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    assert!(adapter_calls(&effects).is_empty());
    assert_eq!(
        state.pipeline().status(),
        &PipelineStatus::ParsingJobDescription
    );
}

#[test]
fn resume_parse_failure_skips_job_description() {
    init_logging();
    let (state, _) = finalize(at_job_details());
    let (state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Err(RemoteFailure::new(FailureCause::Timeout, "request timed out")),
        },
    );
    assert!(adapter_calls(&effects).is_empty());

    let failure = state.pipeline().status().failure().expect("failed");
    assert!(failure.is_timeout());
    assert_eq!(failure.to_string(), "resume parsing failed: request timed out");
    assert!(state.pipeline().structured_resume().is_none());
}

#[test]
fn retry_is_ignored_unless_failed() {
    init_logging();
    let state = at_job_details();
    let (state, effects) = send(state, Msg::RetryClicked);
    assert!(adapter_calls(&effects).is_empty());
    assert_eq!(state.pipeline().status(), &PipelineStatus::Idle);
}

#[test]
fn guide_steps_show_stage_specific_loading() {
    init_logging();
    let (state, _) = finalize(at_job_details());
    assert_eq!(
        state.view().step,
        StepView::Preparing {
            phase: Phase::ParsingResume
        }
    );

    let (state, _) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    assert_eq!(
        state.view().step,
        StepView::Preparing {
            phase: Phase::ParsingJobDescription
        }
    );
}

#[test]
fn blank_company_name_is_not_sent() {
    init_logging();
    let state = at_job_details();
    let (state, _) = send(state, Msg::CompanyNameChanged("   ".to_string()));
    let (state, _) = finalize(state);
    let (_state, effects) = send(
        state,
        Msg::ResumeParsed {
            run: 1,
            result: Ok(structured_resume()),
        },
    );
    assert_eq!(
        work(effects),
        vec![Effect::ParseJobDescription {
            run: 1,
            description: JOB_DESCRIPTION.to_string(),
            company_name: None,
        }]
    );
}

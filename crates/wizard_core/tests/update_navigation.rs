mod common;

use common::*;
use pretty_assertions::assert_eq;
use wizard_core::{
    Effect, GuideSection, InputMissing, Location, Msg, PipelineStatus, StepView, WizardState,
    WizardStep,
};

#[test]
fn step_zero_rerender_does_not_reset_twice() {
    init_logging();
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(0)));
    let state = provide_resume(state, RESUME_TEXT);

    let (state, effects) = send(state, Msg::RouteChanged(route(0)));
    assert!(effects.is_empty());
    assert!(state.resume().is_ready());
    assert!(state.navigator().marker().is_set());
}

#[test]
fn returning_to_step_zero_starts_a_new_run() {
    init_logging();
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(0)));
    let state = provide_resume(state, RESUME_TEXT);
    let (state, _) = send(state, Msg::NextClicked);
    assert!(!state.navigator().marker().is_set());

    let (state, effects) = send(state, Msg::BackClicked);
    assert_eq!(work(effects), vec![Effect::PushRoute(route(0))]);
    assert!(!state.resume().is_selected());
    assert!(state.completed_steps().is_empty());
}

#[test]
fn route_is_the_source_of_truth() {
    init_logging();
    let (state, effects) = send(WizardState::new(), Msg::RouteChanged(route(5)));
    assert!(work(effects).is_empty());
    assert_eq!(state.view().current_step, Some(5));
    assert_eq!(
        state.navigator().location(),
        &Location::Step(WizardStep::new(5).unwrap())
    );

    let (state, _) = send(state, Msg::RouteChanged(route(3)));
    assert_eq!(state.view().current_step, Some(3));
}

#[test]
fn advance_and_back_push_routes() {
    init_logging();
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(4)));
    let (state, effects) = send(state, Msg::NextClicked);
    assert_eq!(work(effects), vec![Effect::PushRoute(route(5))]);
    let (state, effects) = send(state, Msg::BackClicked);
    assert_eq!(work(effects), vec![Effect::PushRoute(route(4))]);

    // The host echoes the pushed route; nothing changes.
    let before = state.clone();
    let (state, effects) = send(state, Msg::RouteChanged(route(4)));
    assert!(effects.is_empty());
    assert_eq!(state.view(), before.view());
}

#[test]
fn invalid_step_mutates_nothing() {
    init_logging();
    let state = at_job_details();
    let before = state.snapshot();

    for raw in ["/interview-v2/step/12", "/interview-v2/step/abc", "/nowhere"] {
        let (next, effects) = send(state.clone(), Msg::RouteChanged(raw.to_string()));
        assert!(effects.is_empty(), "{raw}");
        assert_eq!(next.snapshot(), before);
        assert_eq!(
            next.view().step,
            StepView::Invalid {
                requested: raw.to_string()
            }
        );

        let (next, effects) = send(next, Msg::NextClicked);
        assert!(effects.is_empty());
        let (_next, effects) = send(next, Msg::BackClicked);
        assert!(effects.is_empty());
    }
}

#[test]
fn advance_without_resume_is_blocked_locally() {
    init_logging();
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(0)));
    assert!(!state.view().can_advance);

    let (state, effects) = send(state, Msg::NextClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.current_step, Some(0));
    assert_eq!(view.advance_blocked, Some(InputMissing::Resume));
    assert_eq!(view.pipeline, PipelineStatus::Idle);
}

#[test]
fn advance_without_description_is_blocked_locally() {
    init_logging();
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(0)));
    let state = provide_resume(state, RESUME_TEXT);
    let (state, _) = send(state, Msg::NextClicked);
    let (state, _) = send(state, Msg::DescriptionChanged("   ".to_string()));

    let (state, effects) = send(state, Msg::NextClicked);
    assert!(effects.is_empty());
    assert!(!state.job_details().is_finalized());
    assert_eq!(
        state.view().advance_blocked,
        Some(InputMissing::JobDescription)
    );

    let (state, _) = send(state, Msg::DescriptionChanged(JOB_DESCRIPTION.to_string()));
    assert_eq!(state.view().advance_blocked, None);
    assert!(state.view().can_advance);
}

#[test]
fn returning_to_job_details_unfinalizes() {
    init_logging();
    let (state, _) = send(at_job_details(), Msg::NextClicked);
    assert!(state.job_details().is_finalized());

    let (state, _) = send(state, Msg::BackClicked);
    assert_eq!(state.view().current_step, Some(1));
    assert!(!state.job_details().is_finalized());
}

#[test]
fn start_over_resets_once_despite_route_echo() {
    init_logging();
    let (state, _) = send(at_job_details(), Msg::NextClicked);
    assert_eq!(state.pipeline().status(), &PipelineStatus::ParsingResume);

    let (state, effects) = send(state, Msg::StartOverClicked);
    assert_eq!(
        work(effects),
        vec![Effect::AbandonRun { run: 1 }, Effect::PushRoute(route(0))]
    );
    assert_eq!(state.view().current_step, Some(0));

    let state = provide_resume(state, "Jane Roe, data engineer");
    let (state, effects) = send(state, Msg::RouteChanged(route(0)));
    assert!(effects.is_empty());
    assert!(state.resume().is_ready());
}

#[test]
fn guide_steps_render_sections_once_ready() {
    init_logging();
    let (state, _) = send(at_job_details(), Msg::NextClicked);
    let (state, _) = complete_run(state, 1);

    assert_eq!(
        state.view().step,
        StepView::Section {
            section: GuideSection::CompanyIndustry,
            available: true,
        }
    );

    let (state, _) = send(state, Msg::NextClicked);
    assert_eq!(
        state.view().step,
        StepView::Section {
            section: GuideSection::DepartmentContext,
            available: false,
        }
    );
}

#[test]
fn advancing_past_the_last_step_exports_the_guide() {
    init_logging();
    let (state, _) = send(at_job_details(), Msg::NextClicked);
    let (state, _) = complete_run(state, 1);
    let (state, _) = send(state, Msg::RouteChanged(route(11)));

    let (state, effects) = send(state, Msg::NextClicked);
    assert_eq!(work(effects), vec![Effect::ExportGuide(guide())]);
    assert_eq!(state.view().current_step, Some(11));
    assert!(state.completed_steps().contains(&11));
}

#[test]
fn last_step_without_guide_is_a_noop() {
    init_logging();
    let (state, _) = send(WizardState::new(), Msg::RouteChanged(route(11)));
    let (_state, effects) = send(state, Msg::NextClicked);
    assert!(effects.is_empty());
}

#[test]
fn progress_tracks_completed_steps() {
    init_logging();
    let (state, _) = send(at_job_details(), Msg::NextClicked);
    let view = state.view();
    assert_eq!(view.completed_steps, vec![0, 1]);
    assert_eq!(view.progress_percent, 17);
}

#[test]
fn wizard_root_redirects_to_the_first_step() {
    init_logging();
    let (state, effects) = send(WizardState::new(), Msg::RouteChanged("/interview-v2".to_string()));
    assert_eq!(work(effects), vec![Effect::PushRoute(route(0))]);
    assert_eq!(state.view().current_step, Some(0));

    // The echoed canonical route neither redirects nor resets again.
    let state = provide_resume(state, RESUME_TEXT);
    let (state, effects) = send(state, Msg::RouteChanged(route(0)));
    assert!(effects.is_empty());
    assert!(state.resume().is_ready());
}

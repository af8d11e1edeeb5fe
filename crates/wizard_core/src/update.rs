use crate::navigator::{parse_route, RouteTarget};
use crate::{Effect, Msg, WizardState};

/// Pure update function: applies a message to state and returns any effects.
///
/// After every message the pipeline gets to observe the input gate, so a run
/// starts exactly when résumé readiness and job-details finalization first
/// hold together. Any change to the persistable fields yields a
/// `PersistSnapshot` effect.
pub fn update(mut state: WizardState, msg: Msg) -> (WizardState, Vec<Effect>) {
    if matches!(msg, Msg::Tick | Msg::NoOp) {
        return (state, Vec::new());
    }
    let persist = !matches!(msg, Msg::Restore(_));
    let before = state.snapshot();

    let mut effects = match msg {
        Msg::RouteChanged(path) => {
            let target = parse_route(&path);
            // Non-canonical step paths (the wizard root included) redirect.
            let redirect = match &target {
                RouteTarget::Step(step) if step.route() != path => Some(step.route()),
                _ => None,
            };
            let mut effects: Vec<Effect> = redirect.map(Effect::PushRoute).into_iter().collect();
            effects.extend(state.visit(target));
            effects
        }
        Msg::ResumeProvided { text, source } => {
            state.resume.set_resume(text, source);
            state.blocked = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ResumeCleared => {
            state.resume.clear_resume();
            state.mark_dirty();
            Vec::new()
        }
        Msg::DescriptionChanged(text) => {
            state.job.set_description(text);
            state.blocked = None;
            state.mark_dirty();
            Vec::new()
        }
        Msg::CompanyNameChanged(text) => {
            state.job.set_company_name(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::NextClicked => state.advance(),
        Msg::BackClicked => state.back(),
        Msg::RetryClicked => {
            state.mark_dirty();
            state
                .pipeline
                .retry(&state.resume, &state.job)
                .into_iter()
                .collect()
        }
        Msg::StartOverClicked => state.start_over(),
        Msg::Restore(snapshot) => {
            state.restore(snapshot);
            Vec::new()
        }
        Msg::ResumeParsed { run, result } => {
            state.mark_dirty();
            state
                .pipeline
                .on_resume_parsed(run, result)
                .into_iter()
                .collect()
        }
        Msg::JobDescriptionParsed { run, result } => {
            state.mark_dirty();
            state
                .pipeline
                .on_job_description_parsed(run, result)
                .into_iter()
                .collect()
        }
        Msg::GuideGenerated { run, result } => {
            state.mark_dirty();
            state.pipeline.on_guide_generated(run, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    if let Some(start) = state.pipeline.observe_gate(&state.resume, &state.job) {
        effects.push(start);
    }

    let after = state.snapshot();
    if persist && after != before {
        effects.push(Effect::PersistSnapshot(after));
    }

    (state, effects)
}

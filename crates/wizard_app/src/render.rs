use serde_json::Value;
use wizard_core::{InputMissing, Phase, StepView, WizardStep, WizardView, STEP_COUNT};

pub fn render(view: &WizardView) -> Vec<String> {
    let mut lines = Vec::new();

    let header = match view.current_step {
        Some(index) => {
            let title = WizardStep::new(index).map(WizardStep::title).unwrap_or("?");
            format!(
                "Step {} of {}: {} | Progress {}%",
                index + 1,
                STEP_COUNT,
                title,
                view.progress_percent
            )
        }
        None => format!("Interview prep | Progress {}%", view.progress_percent),
    };
    lines.push(header);

    match &view.step {
        StepView::NotStarted => lines.push("Not started.".to_string()),
        StepView::ResumeUpload => lines.push(if view.resume_selected {
            "Résumé selected.".to_string()
        } else {
            "Upload your résumé to begin.".to_string()
        }),
        StepView::JobDetails => lines.push(if view.job_details_finalized {
            "Job details saved.".to_string()
        } else {
            "Enter the job description and, optionally, the company name.".to_string()
        }),
        StepView::Preparing { phase } => lines.push(preparing_text(*phase).to_string()),
        StepView::Failed { message } => {
            lines.push(format!("Error: {message}"));
            lines.push("Try Again is available.".to_string());
        }
        StepView::Section { section, available } => {
            lines.push(format!("== {} ==", section.title()));
            let body = view
                .guide
                .as_ref()
                .and_then(|guide| guide.section(*section))
                .filter(|_| *available);
            match body {
                Some(body) => lines.extend(section_lines(body, 0)),
                None => lines.push("This section is not available in your guide.".to_string()),
            }
        }
        StepView::Invalid { requested } => {
            lines.push(format!("Invalid step: {requested}"));
        }
    }

    if view.resume_needs_reattach {
        lines.push(
            "Your résumé file is no longer attached; upload it again to continue.".to_string(),
        );
    }
    if let Some(missing) = view.advance_blocked {
        lines.push(blocked_text(missing).to_string());
    }

    lines
}

fn preparing_text(phase: Phase) -> &'static str {
    match phase {
        Phase::ParsingResume => "Preparing your guide: parsing résumé…",
        Phase::ParsingJobDescription => "Preparing your guide: parsing job description…",
        Phase::GeneratingGuide => "Preparing your guide: generating…",
        Phase::Waiting | Phase::Ready | Phase::Failed => {
            "Your guide is being prepared. Finish the first two steps to start."
        }
    }
}

fn blocked_text(missing: InputMissing) -> &'static str {
    match missing {
        InputMissing::Resume => "Upload a résumé before continuing.",
        InputMissing::ResumeNeedsReattach => "Upload your résumé again before continuing.",
        InputMissing::JobDescription => "Enter a job description before continuing.",
    }
}

/// Flattens an opaque section body into indented `key: value` lines.
fn section_lines(value: &Value, depth: usize) -> Vec<String> {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => map
            .iter()
            .flat_map(|(key, inner)| match inner {
                Value::Object(_) | Value::Array(_) => {
                    let mut lines = vec![format!("{indent}{}:", humanize(key))];
                    lines.extend(section_lines(inner, depth + 1));
                    lines
                }
                scalar => vec![format!("{indent}{}: {}", humanize(key), scalar_text(scalar))],
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .flat_map(|item| match item {
                Value::Object(_) | Value::Array(_) => {
                    let mut lines = vec![format!("{indent}-")];
                    lines.extend(section_lines(item, depth + 1));
                    lines
                }
                scalar => vec![format!("{indent}- {}", scalar_text(scalar))],
            })
            .collect(),
        scalar => vec![format!("{indent}{}", scalar_text(scalar))],
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

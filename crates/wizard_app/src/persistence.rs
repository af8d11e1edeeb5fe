use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wizard_core::{Guide, StructuredJobDescription, StructuredResume, WizardSnapshot};
use wizard_engine::AtomicFileWriter;
use wizard_logging::{wizard_error, wizard_info, wizard_warn};

const STATE_FILENAME: &str = ".interview_prep_wizard.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct PersistedWizard {
    resume_selected: bool,
    description: String,
    company_name: String,
    finalized: bool,
    structured_resume: Option<Value>,
    structured_job_description: Option<Value>,
    guide: Option<Guide>,
    completed_steps: Vec<usize>,
}

impl From<&WizardSnapshot> for PersistedWizard {
    fn from(snapshot: &WizardSnapshot) -> Self {
        Self {
            resume_selected: snapshot.resume_selected,
            description: snapshot.description.clone(),
            company_name: snapshot.company_name.clone(),
            finalized: snapshot.finalized,
            structured_resume: snapshot.structured_resume.as_ref().map(|r| r.0.clone()),
            structured_job_description: snapshot
                .structured_job_description
                .as_ref()
                .map(|jd| jd.0.clone()),
            guide: snapshot.guide.clone(),
            completed_steps: snapshot.completed_steps.clone(),
        }
    }
}

impl From<PersistedWizard> for WizardSnapshot {
    fn from(persisted: PersistedWizard) -> Self {
        Self {
            resume_selected: persisted.resume_selected,
            description: persisted.description,
            company_name: persisted.company_name,
            finalized: persisted.finalized,
            structured_resume: persisted.structured_resume.map(StructuredResume),
            structured_job_description: persisted
                .structured_job_description
                .map(StructuredJobDescription),
            guide: persisted.guide,
            completed_steps: persisted.completed_steps,
        }
    }
}

/// The wizard's single saved record under the state directory.
pub struct StateStore {
    writer: AtomicFileWriter,
}

impl StateStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(state_dir),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.path_of(STATE_FILENAME)
    }

    /// `None` when nothing usable is saved; problems are logged, not returned.
    pub fn load(&self) -> Option<WizardSnapshot> {
        let path = self.path();
        let content = match self.writer.read(STATE_FILENAME) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                wizard_warn!("Failed to read saved wizard from {:?}: {}", path, err);
                return None;
            }
        };

        match ron::from_str::<PersistedWizard>(&content) {
            Ok(persisted) => {
                wizard_info!("Loaded saved wizard from {:?}", path);
                Some(persisted.into())
            }
            Err(err) => {
                wizard_warn!("Failed to parse saved wizard from {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn save(&self, snapshot: &WizardSnapshot) {
        let persisted = PersistedWizard::from(snapshot);
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&persisted, pretty) {
            Ok(text) => text,
            Err(err) => {
                wizard_error!("Failed to serialize wizard state: {}", err);
                return;
            }
        };

        if let Err(err) = self.writer.write(STATE_FILENAME, &content) {
            wizard_error!(
                "Failed to write wizard state to {:?}: {}",
                self.writer.dir(),
                err
            );
        }
    }
}

/// Writes the guide as pretty JSON to `target`, replacing any previous file.
pub fn export_guide(target: &Path, guide: &Guide) -> Result<PathBuf> {
    let file_name = target
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("export path {target:?} has no file name"))?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let content = serde_json::to_string_pretty(guide).context("serializing guide")?;
    let written = AtomicFileWriter::new(dir)
        .write(file_name, &content)
        .with_context(|| format!("writing guide to {target:?}"))?;
    wizard_info!("Exported guide to {:?}", written);
    Ok(written)
}

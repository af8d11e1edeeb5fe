//! Wizard engine: remote adapters and file persistence for the wizard host.
mod client;
mod engine;
mod generate;
mod parse;
mod persist;
mod settings;
mod types;

pub use client::{ReqwestPrepClient, GENERATE_PATH, PARSE_JOB_DESCRIPTION_PATH, PARSE_RESUME_PATH};
pub use engine::{EngineError, EngineHandle};
pub use generate::GenerationAdapter;
pub use parse::ParsingAdapter;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use settings::{EngineSettings, DEFAULT_BASE_URL};
pub use types::{
    EngineEvent, FailureKind, GuideRequest, JobDescriptionParseRequest, RemoteError,
    ResumeParseRequest, RunId,
};

use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use wizard_logging::{wizard_debug, wizard_info};

use crate::{
    EngineEvent, EngineSettings, GenerationAdapter, GuideRequest, ParsingAdapter, RemoteError,
    ReqwestPrepClient, RunId,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] RemoteError),
    #[error("engine thread stopped")]
    Stopped,
}

enum RemoteCall {
    ParseResume {
        resume_text: String,
    },
    ParseJobDescription {
        description: String,
        company_name: Option<String>,
    },
    GenerateGuide {
        request: GuideRequest,
    },
}

enum EngineCommand {
    Call { run: RunId, call: RemoteCall },
    Abandon { run: RunId },
}

impl EngineCommand {
    fn run(&self) -> RunId {
        match self {
            EngineCommand::Call { run, .. } | EngineCommand::Abandon { run } => *run,
        }
    }
}

/// Runs adapter calls on a background tokio runtime and reports each
/// completion as an [`EngineEvent`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let client = Arc::new(ReqwestPrepClient::new(settings)?);
        Self::with_adapters(client.clone(), client)
    }

    pub fn with_adapters(
        parser: Arc<dyn ParsingAdapter>,
        generator: Arc<dyn GenerationAdapter>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let mut runs: HashMap<RunId, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                let run = command.run();
                // Anything older than the newest run can only produce stale results.
                runs.retain(|known, token| {
                    if *known < run {
                        token.cancel();
                        false
                    } else {
                        true
                    }
                });

                let call = match command {
                    EngineCommand::Call { call, .. } => call,
                    EngineCommand::Abandon { run } => {
                        if let Some(token) = runs.remove(&run) {
                            wizard_info!("Abandoning run {}", run);
                            token.cancel();
                        }
                        continue;
                    }
                };

                let token = runs.entry(run).or_default().clone();
                let parser = parser.clone();
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            wizard_debug!("Run {} cancelled before completion", run);
                        }
                        event = execute(parser.as_ref(), generator.as_ref(), run, call) => {
                            let _ = event_tx.send(event);
                        }
                    }
                });
            }
            runtime.shutdown_background();
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn parse_resume(&self, run: RunId, resume_text: impl Into<String>) {
        self.send(EngineCommand::Call {
            run,
            call: RemoteCall::ParseResume {
                resume_text: resume_text.into(),
            },
        });
    }

    pub fn parse_job_description(
        &self,
        run: RunId,
        description: impl Into<String>,
        company_name: Option<String>,
    ) {
        self.send(EngineCommand::Call {
            run,
            call: RemoteCall::ParseJobDescription {
                description: description.into(),
                company_name,
            },
        });
    }

    pub fn generate_guide(&self, run: RunId, request: GuideRequest) {
        self.send(EngineCommand::Call {
            run,
            call: RemoteCall::GenerateGuide { request },
        });
    }

    /// Cancels the run's outstanding call; nothing is reported for it.
    pub fn abandon(&self, run: RunId) {
        self.send(EngineCommand::Abandon { run });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// `Ok(None)` when nothing completed within `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn execute(
    parser: &dyn ParsingAdapter,
    generator: &dyn GenerationAdapter,
    run: RunId,
    call: RemoteCall,
) -> EngineEvent {
    match call {
        RemoteCall::ParseResume { resume_text } => EngineEvent::ResumeParsed {
            run,
            result: parser.parse_resume(&resume_text).await,
        },
        RemoteCall::ParseJobDescription {
            description,
            company_name,
        } => EngineEvent::JobDescriptionParsed {
            run,
            result: parser
                .parse_job_description(&description, company_name.as_deref())
                .await,
        },
        RemoteCall::GenerateGuide { request } => EngineEvent::GuideGenerated {
            run,
            result: generator.generate_guide(&request).await,
        },
    }
}

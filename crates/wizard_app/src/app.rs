use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use wizard_core::{
    update, Msg, PipelineStatus, SourceHandle, WizardState, WizardStep, WizardView,
    STEP_ROUTE_PREFIX, WIZARD_ROOT,
};
use wizard_engine::EngineHandle;
use wizard_logging::{wizard_debug, wizard_info, wizard_warn};

use crate::cli::{Args, Command};
use crate::effects::{EffectRunner, HostAction};
use crate::persistence::{export_guide, StateStore};
use crate::render::render;

const DEFAULT_EXPORT_FILE: &str = "interview_prep_guide.json";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(args: Args) -> Result<()> {
    let engine = EngineHandle::new(args.engine_settings()).context("starting engine")?;
    let mut app = App::new(
        EffectRunner::new(engine),
        StateStore::new(&args.state_dir),
        args.state_dir.join(DEFAULT_EXPORT_FILE),
        args.engine_settings().request_timeout,
    );
    app.restore()?;

    match args.command {
        Command::Prepare {
            resume,
            job_description,
            company,
            retries,
            export,
        } => {
            if let Some(target) = export.clone() {
                app.set_export_target(target);
            }
            let description = fs::read_to_string(&job_description)
                .with_context(|| format!("reading job description {job_description:?}"))?;

            app.navigate(WIZARD_ROOT)?;
            app.provide_resume_file(&resume)?;
            app.send(Msg::NextClicked)?;
            app.send(Msg::DescriptionChanged(description))?;
            if let Some(company) = company {
                app.send(Msg::CompanyNameChanged(company))?;
            }
            app.send(Msg::NextClicked)?;
            app.ensure_not_blocked()?;

            let outcome = app.finish_pipeline(retries);
            app.print();
            outcome?;
            if export.is_some() {
                let written = app.export()?;
                println!("Guide written to {}", written.display());
            }
        }
        Command::Show { step } => {
            app.navigate(format!("{STEP_ROUTE_PREFIX}{step}"))?;
            app.print();
        }
        Command::Resume { resume, retries } => {
            if !app.state().job_details().is_finalized() {
                bail!("nothing to resume; run `prepare` first");
            }
            app.navigate(first_guide_step().route())?;
            app.provide_resume_file(&resume)?;
            let outcome = app.finish_pipeline(retries);
            app.print();
            outcome?;
        }
        Command::Export { out } => {
            app.set_export_target(out);
            let written = app.export()?;
            println!("Guide written to {}", written.display());
        }
        Command::Reset => {
            app.send(Msg::StartOverClicked)?;
            println!("Wizard cleared.");
        }
    }

    Ok(())
}

fn first_guide_step() -> WizardStep {
    WizardStep::JOB_DETAILS.next().unwrap_or(WizardStep::LAST)
}

/// Headless host: owns the wizard state, plays the browser's part for routes
/// and storage, and runs effects against the engine.
pub struct App {
    state: WizardState,
    runner: EffectRunner,
    store: StateStore,
    inbox: VecDeque<Msg>,
    route: Option<String>,
    export_target: PathBuf,
    exported: Option<PathBuf>,
    call_timeout: Duration,
}

impl App {
    pub fn new(
        runner: EffectRunner,
        store: StateStore,
        export_target: PathBuf,
        call_timeout: Duration,
    ) -> Self {
        Self {
            state: WizardState::new(),
            runner,
            store,
            inbox: VecDeque::new(),
            route: None,
            export_target,
            exported: None,
            call_timeout,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn view(&self) -> WizardView {
        self.state.view()
    }

    pub fn set_export_target(&mut self, target: PathBuf) {
        self.export_target = target;
    }

    pub fn restore(&mut self) -> Result<()> {
        match self.store.load() {
            Some(snapshot) => self.send(Msg::Restore(snapshot)),
            None => Ok(()),
        }
    }

    pub fn navigate(&mut self, path: impl Into<String>) -> Result<()> {
        let path = path.into();
        self.route = Some(path.clone());
        self.send(Msg::RouteChanged(path))
    }

    pub fn provide_resume_file(&mut self, path: &Path) -> Result<()> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading résumé {path:?}"))?;
        self.send(Msg::ResumeProvided {
            text: Some(text),
            source: Some(SourceHandle::new(path)),
        })
    }

    pub fn send(&mut self, msg: Msg) -> Result<()> {
        self.inbox.push_back(msg);
        self.process_pending_messages()
    }

    fn process_pending_messages(&mut self) -> Result<()> {
        while let Some(msg) = self.inbox.pop_front() {
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            for line in render(&self.state.view()) {
                wizard_debug!("view: {}", line);
            }
        }

        for action in self.runner.run(effects) {
            match action {
                HostAction::Navigate(path) => {
                    if self.route.as_deref() != Some(path.as_str()) {
                        self.route = Some(path.clone());
                        self.inbox.push_back(Msg::RouteChanged(path));
                    }
                }
                HostAction::Persist(snapshot) => self.store.save(&snapshot),
                HostAction::Export(guide) => {
                    self.exported = Some(export_guide(&self.export_target, &guide)?);
                }
            }
        }
        Ok(())
    }

    fn ensure_not_blocked(&self) -> Result<()> {
        match self.view().advance_blocked {
            Some(missing) => Err(anyhow!(missing)),
            None => Ok(()),
        }
    }

    /// Feeds engine completions back in until no call is outstanding.
    pub fn wait_for_pipeline(&mut self) -> Result<()> {
        // Three sequential calls, each bounded by the client timeout.
        let deadline = self
            .call_timeout
            .checked_mul(3)
            .and_then(|budget| budget.checked_add(Duration::from_secs(5)))
            .and_then(|budget| Instant::now().checked_add(budget))
            .with_context(|| format!("call timeout {:?} is too large", self.call_timeout))?;
        while self.state.pipeline().status().is_in_flight() {
            if Instant::now() > deadline {
                bail!("no answer from the engine within the call timeouts");
            }
            let next = self
                .runner
                .next_message(POLL_INTERVAL)
                .context("waiting for the engine")?;
            if let Some(msg) = next {
                self.send(msg)?;
            }
        }
        Ok(())
    }

    /// Waits for the run, pressing "Try Again" up to `retries` times.
    pub fn finish_pipeline(&mut self, retries: u32) -> Result<()> {
        let mut attempts = 0;
        loop {
            self.wait_for_pipeline()?;
            match self.state.pipeline().status().clone() {
                PipelineStatus::Succeeded => {
                    wizard_info!("Guide ready");
                    return Ok(());
                }
                PipelineStatus::Failed(failure) if attempts < retries => {
                    attempts += 1;
                    wizard_warn!("{}; retrying ({}/{})", failure, attempts, retries);
                    self.send(Msg::RetryClicked)?;
                }
                PipelineStatus::Failed(failure) => return Err(anyhow!(failure)),
                PipelineStatus::Idle => {
                    let view = self.view();
                    return match view.advance_blocked {
                        Some(missing) => Err(anyhow!(missing)),
                        None if view.resume_needs_reattach => {
                            bail!("the résumé must be uploaded again")
                        }
                        None => bail!("the wizard has not started generating a guide"),
                    };
                }
                in_flight => bail!("pipeline stopped while {in_flight:?}"),
            }
        }
    }

    /// Walks to the last step and advances past it, which exports the guide.
    pub fn export(&mut self) -> Result<PathBuf> {
        if self.state.pipeline().guide().is_none() {
            bail!("no guide has been generated yet");
        }
        self.exported = None;
        self.navigate(WizardStep::LAST.route())?;
        self.send(Msg::NextClicked)?;
        self.exported
            .clone()
            .context("the wizard did not export the guide")
    }

    pub fn print(&self) {
        for line in render(&self.view()) {
            println!("{line}");
        }
    }
}

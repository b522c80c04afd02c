use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use engine_logging::{engine_error, engine_info, engine_warn};
use shortener_core::{is_well_formed_url, update, FormState, Msg, Outcome, Phase};
use shortener_engine::EngineError;

use super::effects::EffectRunner;
use super::settings::Settings;
use super::ui;

/// How long one loop iteration waits on the engine before looking at input again.
const TICK: Duration = Duration::from_millis(75);
const HEALTH_WAIT: Duration = Duration::from_secs(30);

pub enum Mode {
    Interactive,
    OneShot(String),
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunResult {
    Done,
    Failed,
    InvalidInput,
}

impl From<RunResult> for ExitCode {
    fn from(result: RunResult) -> Self {
        match result {
            RunResult::Done => ExitCode::SUCCESS,
            RunResult::Failed => ExitCode::FAILURE,
            RunResult::InvalidInput => ExitCode::from(2),
        }
    }
}

pub fn run(mode: Mode, settings: &Settings) -> Result<ExitCode> {
    let mut app = App::new(settings)?;
    let stdout = io::stdout();
    let stderr = io::stderr();

    let result = match mode {
        Mode::Interactive => {
            let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
            spawn_input_reader(BufReader::new(io::stdin()), msg_tx);
            run_interactive(&mut app, &settings.service_url, msg_rx, &mut stdout.lock())?
        }
        Mode::OneShot(url) => run_once(&mut app, url, &mut stdout.lock(), &mut stderr.lock())?,
        Mode::Health => run_health(&app, &mut stdout.lock(), &mut stderr.lock())?,
    };
    Ok(result.into())
}

struct App {
    state: FormState,
    runner: EffectRunner,
    last_frame: Vec<String>,
}

impl App {
    fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            state: FormState::new(),
            runner: EffectRunner::new(settings)?,
            last_frame: Vec::new(),
        })
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Why a submit gesture right now would be dropped, if it would.
    fn submit_notice(&self) -> Option<&'static str> {
        if self.state.phase().is_submitting() {
            Some(ui::constants::BUSY)
        } else if !is_well_formed_url(self.state.input_url()) {
            Some(ui::constants::INVALID_INPUT)
        } else {
            None
        }
    }

    /// Feeds at most one engine event into the form. A stopped engine fails the
    /// in-flight request before the error is returned.
    fn pump_engine(&mut self) -> Result<(), EngineError> {
        match self.runner.next_msg(TICK) {
            Ok(Some(msg)) => {
                self.dispatch(msg);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                engine_error!("Engine unavailable: {}", err);
                if let Some(request_id) = self.state.in_flight() {
                    self.dispatch(Msg::ShortenCompleted {
                        request_id,
                        outcome: Outcome::Failed {
                            message: err.to_string(),
                        },
                    });
                }
                Err(err)
            }
        }
    }

    fn initial_frame(&mut self) -> Vec<String> {
        self.state.consume_dirty();
        self.last_frame = ui::render::render(&self.state.view());
        self.last_frame.clone()
    }

    /// Renders only when state changed and the visible lines differ from the last frame.
    fn next_frame(&mut self) -> Option<Vec<String>> {
        if !self.state.consume_dirty() {
            return None;
        }
        let frame = ui::render::render(&self.state.view());
        if frame == self.last_frame {
            return None;
        }
        self.last_frame = frame.clone();
        Some(frame)
    }
}

fn write_prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}", ui::constants::PROMPT)?;
    out.flush()
}

fn run_interactive(
    app: &mut App,
    service_url: &str,
    msg_rx: mpsc::Receiver<Msg>,
    out: &mut impl Write,
) -> Result<RunResult> {
    for line in ui::layout::banner(service_url) {
        writeln!(out, "{line}")?;
    }
    for line in app.initial_frame() {
        writeln!(out, "{line}")?;
    }
    write_prompt(out)?;

    loop {
        loop {
            let msg = match msg_rx.try_recv() {
                Ok(msg) => msg,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => Msg::Teardown,
            };
            if msg == Msg::Teardown {
                app.dispatch(msg);
                engine_info!("Form closed");
                writeln!(out)?;
                return Ok(RunResult::Done);
            }
            if msg == Msg::SubmitClicked {
                if let Some(notice) = app.submit_notice() {
                    writeln!(out, "{notice}")?;
                    write_prompt(out)?;
                }
            }
            app.dispatch(msg);
        }

        let pumped = app.pump_engine();

        if let Some(frame) = app.next_frame() {
            for line in frame {
                writeln!(out, "{line}")?;
            }
            write_prompt(out)?;
        }
        pumped?;
    }
}

/// Each entered line is typed into the form and submitted, like pressing Enter.
/// `:quit` or end of input closes the form.
fn spawn_input_reader<R>(input: R, msg_tx: mpsc::Sender<Msg>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else { break };
            if line.trim() == ui::constants::QUIT_COMMAND {
                break;
            }
            if msg_tx.send(Msg::InputChanged(line)).is_err()
                || msg_tx.send(Msg::SubmitClicked).is_err()
            {
                return;
            }
        }
        let _ = msg_tx.send(Msg::Teardown);
    });
}

fn run_once(
    app: &mut App,
    url: String,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<RunResult> {
    app.dispatch(Msg::InputChanged(url));
    if let Some(notice) = app.submit_notice() {
        writeln!(err, "{notice}")?;
        return Ok(RunResult::InvalidInput);
    }
    app.dispatch(Msg::SubmitClicked);

    loop {
        match app.state.phase() {
            Phase::Succeeded { short_url } => {
                writeln!(out, "{short_url}")?;
                return Ok(RunResult::Done);
            }
            Phase::Failed { message } => {
                writeln!(err, "{} {message}", ui::constants::ERROR_PREFIX)?;
                return Ok(RunResult::Failed);
            }
            Phase::Idle => return Ok(RunResult::InvalidInput),
            Phase::Submitting { .. } => {
                // A stopped engine has already failed the request; the next pass exits.
                let _ = app.pump_engine();
            }
        }
    }
}

fn run_health(app: &App, out: &mut impl Write, err: &mut impl Write) -> Result<RunResult> {
    match app.runner.check_health(HEALTH_WAIT)? {
        Some(Ok(report)) => {
            for (component, up) in &report {
                let status = if *up { "up" } else { "down" };
                writeln!(out, "{component}: {status}")?;
            }
            if report.values().all(|up| *up) {
                Ok(RunResult::Done)
            } else {
                Ok(RunResult::Failed)
            }
        }
        Some(Err(failure)) => {
            engine_warn!("Health check failed: {}", failure);
            writeln!(err, "{} {failure}", ui::constants::ERROR_PREFIX)?;
            Ok(RunResult::Failed)
        }
        None => {
            writeln!(err, "{} no answer from the service", ui::constants::ERROR_PREFIX)?;
            Ok(RunResult::Failed)
        }
    }
}

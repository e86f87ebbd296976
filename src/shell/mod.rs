//! # Shell
//!
//! Line-oriented front end over a `Navigator` backed by `MemoryHistory`.
//!
//! ```text
//! stdin line ──parse──▶ Command ──execute──▶ Navigator
//!                                               │
//!              stdout ◀── render / results ◀────┘
//! ```
//!
//! Pushed screens keep their `PushResult` here until it completes; every
//! command ends by polling them and printing the ones that finished.

pub mod command;
pub mod render;

use std::io::{self, BufRead, Write};

use futures::FutureExt;
use log::{debug, info, warn};

use crate::ExitMode;
use crate::core::config::ResolvedConfig;
use crate::history::MemoryHistory;
use crate::navigator::{Navigator, PushOutcome, PushResult};
use command::{Command, HELP};

enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    navigator: Navigator<MemoryHistory, String>,
    exit_mode: ExitMode,
    pending: Vec<PushResult>,
}

impl Shell {
    pub fn new(config: ResolvedConfig) -> Self {
        let history = MemoryHistory::new(&config.initial_path);
        let mut navigator = Navigator::new(history, config.routes);
        navigator.subscribe(|state| {
            debug!(
                "Committed: top {} at {}, {} exiting",
                state.top().pathname,
                state.activity_index,
                state.exiting().len()
            )
        });
        Self {
            navigator,
            exit_mode: config.exit_mode,
            pending: Vec::new(),
        }
    }

    pub fn navigator(&self) -> &Navigator<MemoryHistory, String> {
        &self.navigator
    }

    /// Runs one input line and writes its output. Returns false on `quit`.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                return Ok(true);
            }
        };
        debug!("Command: {:?}", command);

        let navigates = command.navigates();
        let flow = match self.execute(command, out) {
            Ok(flow) => {
                if navigates {
                    write!(out, "{}", render::render_tree(&self.navigator.state().activities))?;
                }
                flow
            }
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                Flow::Continue
            }
        };
        self.report_results(out)?;
        Ok(matches!(flow, Flow::Continue))
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, ShellError> {
        match command {
            Command::Push(to) => {
                let result = self.navigator.push(to.as_str())?;
                writeln!(out, "pushed {}", result.pathname())?;
                self.pending.push(result);
            }
            Command::Pop(value) => {
                self.navigator.pop(value)?;
                self.finish_exit()?;
            }
            Command::PopFrom { path, value } => {
                self.navigator.pop_from(&path, value)?;
                self.finish_exit()?;
            }
            Command::PopUntil(pathname) => {
                self.navigator.pop_until(|a| a.pathname == pathname)?;
                self.finish_exit()?;
            }
            Command::Replace(to) => self.navigator.replace(to.as_str())?,
            Command::Back(steps) => {
                let steps = isize::try_from(steps).unwrap_or(isize::MAX);
                self.navigator.go(-steps)?;
                self.finish_exit()?;
            }
            Command::ExitFinished => self.navigator.exit_finished()?,
            Command::Show => {
                let state = self.navigator.state();
                write!(out, "{}", render::render_stack(state))?;
                write!(out, "{}", render::render_tree(&state.activities))?;
            }
            Command::State => {
                writeln!(out, "{}", serde_json::to_string_pretty(self.navigator.state())?)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn finish_exit(&mut self) -> Result<(), ShellError> {
        if self.exit_mode == ExitMode::Instant && !self.navigator.state().exiting().is_empty() {
            self.navigator.exit_finished()?;
        }
        Ok(())
    }

    fn report_results(&mut self, out: &mut impl Write) -> io::Result<()> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|result| match result.now_or_never() {
            Some(outcome) => {
                finished.push((result.pathname().to_string(), outcome));
                false
            }
            None => true,
        });
        for (pathname, outcome) in finished {
            match outcome {
                PushOutcome::Popped(Some(value)) => {
                    writeln!(out, "result {} = {}", pathname, value)?
                }
                PushOutcome::Popped(None) => writeln!(out, "result {} (no value)", pathname)?,
                PushOutcome::Dismissed => writeln!(out, "result {} dismissed", pathname)?,
            }
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
enum ShellError {
    #[error(transparent)]
    Navigation(#[from] crate::core::error::NavigationError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reads commands from stdin until `quit` or end of input.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, stdin.lock(), &mut stdout.lock())
}

pub fn run_with(config: ResolvedConfig, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let mut shell = Shell::new(config);
    info!("Shell ready at {}", shell.navigator().state().location);
    writeln!(out, "navstack at {} (type `help`)", shell.navigator().state().location)?;

    for line in input.lines() {
        let line = line?;
        if !shell.handle_line(&line, out)? {
            break;
        }
        out.flush()?;
    }

    if !shell.pending.is_empty() {
        warn!("{} push results still pending at exit", shell.pending.len());
    }
    info!("Shell exiting");
    Ok(())
}

// crates/access-gate-cli/src/session.rs
// ============================================================================
// Module: Interactive Session
// Description: Line-driven host loop around a single overlay adapter.
// Purpose: Exercise a configured gate from a terminal or a script.
// Dependencies: access-gate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A session owns one overlay adapter, a line reader, a line writer, and a
//! clock. Each input line is a command; prompts issued during `click` read
//! their answers from the same reader. Timers are expired before every
//! command so the printed state always reflects the clock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;
use std::str::FromStr;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use access_gate_core::AttemptStep;
use access_gate_core::OverlayAdapter;
use access_gate_core::PolicyEvaluator;
use access_gate_core::TimerExpiry;
use access_gate_core::Timestamp;
use access_gate_core::UserId;
use thiserror::Error;

use crate::report::StatusReport;
use crate::terminal::TerminalSurface;
use crate::terminal::TerminalWidgetFactory;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Longest single `wait` in milliseconds.
pub const MAX_WAIT_MS: u64 = 600_000;

/// Command summary printed by `help`.
const HELP_TEXT: &str =
    "commands: click | user <id> | logout | status | wait <ms> | help | quit";

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Time source for a session.
pub trait Clock {
    /// Current session time.
    fn now(&self) -> Timestamp;

    /// Lets `millis` milliseconds pass.
    fn wait(&mut self, millis: u64);
}

/// Wall-clock backed session time starting at zero.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    /// Session start.
    start: Instant,
}

impl MonotonicClock {
    /// Starts the clock.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX))
    }

    fn wait(&mut self, millis: u64) {
        thread::sleep(Duration::from_millis(millis));
    }
}

/// Virtual time that only moves on `wait`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    /// Elapsed virtual milliseconds.
    millis: u64,
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.millis)
    }

    fn wait(&mut self, millis: u64) {
        self.millis = self.millis.saturating_add(millis);
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Trigger an unlock attempt.
    Click,
    /// Switch to the named actor.
    User(UserId),
    /// Clear the actor.
    Logout,
    /// Print a status report.
    Status,
    /// Let time pass.
    Wait(u64),
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// Command parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unrecognized command word.
    #[error("unknown command: {0} (try help)")]
    Unknown(String),
    /// Required argument missing.
    #[error("{0} requires an argument")]
    MissingArgument(&'static str),
    /// Wait duration out of range or not a number.
    #[error("wait expects milliseconds between 0 and {MAX_WAIT_MS}, got {0}")]
    InvalidWait(String),
    /// Unexpected trailing input.
    #[error("unexpected argument: {0}")]
    TrailingArgument(String),
}

impl FromStr for SessionCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(CommandError::TrailingArgument(extra.to_string()));
        }
        let parsed = match command {
            "user" => {
                let id = argument.ok_or(CommandError::MissingArgument("user"))?;
                return Ok(Self::User(UserId::new(id)));
            }
            "wait" => {
                let raw = argument.ok_or(CommandError::MissingArgument("wait"))?;
                let millis = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|millis| *millis <= MAX_WAIT_MS)
                    .ok_or_else(|| CommandError::InvalidWait(raw.to_string()))?;
                return Ok(Self::Wait(millis));
            }
            "click" => Self::Click,
            "logout" => Self::Logout,
            "status" => Self::Status,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        match argument {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(parsed),
        }
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Session failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("session io error: {0}")]
    Io(#[from] std::io::Error),
    /// Status serialization failed.
    #[error("status report failed: {0}")]
    Report(String),
}

/// Interactive gate session.
pub struct Session<R, W, C> {
    /// Gate under test.
    adapter: OverlayAdapter<TerminalWidgetFactory>,
    /// Command and prompt answer source.
    input: R,
    /// Output sink.
    output: W,
    /// Time source.
    clock: C,
}

impl<R: BufRead, W: Write, C: Clock> Session<R, W, C> {
    /// Creates a session around a configured adapter.
    pub const fn new(
        adapter: OverlayAdapter<TerminalWidgetFactory>,
        input: R,
        output: W,
        clock: C,
    ) -> Self {
        Self {
            adapter,
            input,
            output,
            clock,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when input or output fails.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            self.expire_timers()?;
            write!(self.output, "> ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<SessionCommand>() {
                Ok(SessionCommand::Quit) => return Ok(()),
                Ok(command) => self.execute(command)?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Executes a single command.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when output fails.
    pub fn execute(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        match command {
            SessionCommand::Click => {
                let step = {
                    let mut surface = TerminalSurface::new(&mut self.input, &mut self.output);
                    let clock = &self.clock;
                    self.adapter.click(&mut surface, || clock.now())
                };
                writeln!(self.output, "{}", describe_step(&step))?;
            }
            SessionCommand::User(id) => {
                writeln!(self.output, "actor: {id}")?;
                self.adapter.set_actor(Some(id));
            }
            SessionCommand::Logout => {
                self.adapter.set_actor(None);
                writeln!(self.output, "actor: none")?;
            }
            SessionCommand::Status => {
                let payload = serde_json::to_string(&self.status())
                    .map_err(|err| SessionError::Report(err.to_string()))?;
                writeln!(self.output, "{payload}")?;
            }
            SessionCommand::Wait(millis) => {
                self.clock.wait(millis);
                self.expire_timers()?;
            }
            SessionCommand::Help => writeln!(self.output, "{HELP_TEXT}")?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    /// Builds the status report at the current clock.
    #[must_use]
    pub fn status(&self) -> StatusReport {
        let rules = self
            .adapter
            .config()
            .map(|config| PolicyEvaluator::new(config).applicable_rules(self.adapter.actor()))
            .unwrap_or_default();
        StatusReport {
            actor: self.adapter.actor().cloned(),
            view: self.adapter.render(self.clock.now()),
            phase: self.adapter.phase(),
            size: self.adapter.reported_size(),
            rules,
        }
    }

    /// Returns the adapter.
    #[must_use]
    pub const fn adapter(&self) -> &OverlayAdapter<TerminalWidgetFactory> {
        &self.adapter
    }

    /// Returns the output sink.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Expires due timers and reports them.
    fn expire_timers(&mut self) -> Result<(), SessionError> {
        match self.adapter.tick(self.clock.now()) {
            Some(TimerExpiry::CooldownElapsed) => writeln!(self.output, "cool-down elapsed")?,
            Some(TimerExpiry::RevealElapsed) => writeln!(self.output, "locked again")?,
            None => {}
        }
        Ok(())
    }
}

/// Short description of an attempt outcome.
const fn describe_step(step: &AttemptStep) -> &'static str {
    match step {
        AttemptStep::Ignored => "ignored",
        AttemptStep::Rejected {
            ..
        } => "blocked",
        AttemptStep::PromptPin {
            ..
        }
        | AttemptStep::PromptConfirmation {
            ..
        } => "awaiting answer",
        AttemptStep::Invalid => "invalid pin",
        AttemptStep::Declined => "declined",
        AttemptStep::Opened => "opened",
    }
}

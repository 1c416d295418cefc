//! Session command implementation.
//!
//! Reads one instruction per line from a script file or stdin and runs it
//! against a single live ticket service, so holds really expire between
//! `wait` steps.
//!
//! ```text
//! # comments and blank lines are skipped
//! hold 3 fan@example.com
//! reserve 1 fan@example.com
//! available
//! status
//! holds
//! wait 500
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Args, ValueEnum};
use seathold::config::OutputFormat as ConfigFormat;
use seathold::{HoldId, HoldOutcome, TicketService};

use crate::error::CliError;
use crate::utils::{
    build_service, describe_hold, hold_json, load_configuration, write_venue, GlobalOptions,
};

/// Run hold and reserve instructions from a script or stdin.
#[derive(Args)]
pub struct SessionCommand {
    /// Script to run (default: read stdin)
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Output format (default: `output_format` from configuration, else human)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Exit with status 1 if any hold or reservation was refused
    #[arg(long)]
    pub strict: bool,
}

/// Output format for session results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one result per instruction
    Human,
    /// One JSON object per line
    Json,
}

impl From<ConfigFormat> for OutputFormat {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Human => OutputFormat::Human,
            ConfigFormat::Json => OutputFormat::Json,
        }
    }
}

impl SessionCommand {
    /// Execute the session command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = self
            .format
            .or_else(|| config.output_format.map(OutputFormat::from))
            .unwrap_or(OutputFormat::Human);

        let input: Box<dyn BufRead> = match self.script {
            Some(ref path) => {
                let file = File::open(path).map_err(|e| {
                    CliError::InvalidArguments(format!(
                        "Cannot open script {}: {e}",
                        path.display()
                    ))
                })?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(io::stdin().lock()),
        };

        let service = build_service(&config)?;
        let stdout = io::stdout();
        let mut session = Session {
            service: &service,
            format,
            out: stdout.lock(),
            refused: 0,
        };
        session.run(input)?;

        if self.strict && session.refused > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{} request(s) were refused",
                session.refused
            )));
        }
        Ok(())
    }
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Hold { seats: usize, email: String },
    Reserve { hold_id: HoldId, email: String },
    Available,
    Status,
    Holds,
    Wait(Duration),
}

impl Step {
    /// Parses a line; `None` for blank lines and comments.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let step = match words.as_slice() {
            ["hold", seats, email] => {
                let seats: usize = seats
                    .parse()
                    .map_err(|_| format!("'{seats}' is not a seat count"))?;
                if seats == 0 {
                    return Err("hold needs at least one seat".to_string());
                }
                Step::Hold {
                    seats,
                    email: (*email).to_string(),
                }
            }
            ["reserve", id, email] => Step::Reserve {
                hold_id: id
                    .parse()
                    .map_err(|_| format!("'{id}' is not a hold id"))?,
                email: (*email).to_string(),
            },
            ["available"] => Step::Available,
            ["status"] => Step::Status,
            ["holds"] => Step::Holds,
            ["wait", ms] => Step::Wait(Duration::from_millis(
                ms.parse()
                    .map_err(|_| format!("'{ms}' is not a number of milliseconds"))?,
            )),
            [verb, ..] => {
                return Err(format!(
                    "unrecognised instruction '{verb}' with {} argument(s)",
                    words.len() - 1
                ))
            }
            [] => return Ok(None),
        };
        Ok(Some(step))
    }

    fn name(&self) -> &'static str {
        match self {
            Step::Hold { .. } => "hold",
            Step::Reserve { .. } => "reserve",
            Step::Available => "available",
            Step::Status => "status",
            Step::Holds => "holds",
            Step::Wait(_) => "wait",
        }
    }
}

struct Session<'a, W> {
    service: &'a TicketService,
    format: OutputFormat,
    out: W,
    refused: usize,
}

impl<W: Write> Session<'_, W> {
    fn run(&mut self, input: impl BufRead) -> Result<(), CliError> {
        for (index, line) in input.lines().enumerate() {
            let malformed =
                |e: String| CliError::InvalidArguments(format!("line {}: {e}", index + 1));
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Err(malformed("not valid UTF-8".to_string()));
                }
                Err(e) => return Err(e.into()),
            };
            let step = Step::parse(&line).map_err(malformed)?;
            if let Some(step) = step {
                self.apply(&step)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, step: &Step) -> Result<(), CliError> {
        match step {
            Step::Hold { seats, email } => {
                let outcome = self.service.find_and_hold_seats(*seats, email)?;
                if outcome.is_error() {
                    self.refused += 1;
                }
                self.emit_hold(step, &outcome)
            }
            Step::Reserve { hold_id, email } => {
                let outcome = self.service.reserve_seats(*hold_id, email)?;
                if !outcome.is_reserved() {
                    self.refused += 1;
                }
                match self.format {
                    OutputFormat::Human => writeln!(self.out, "{}", outcome.message())?,
                    OutputFormat::Json => self.emit_json(&serde_json::json!({
                        "step": step.name(),
                        "hold_id": outcome.hold_id(),
                        "reserved": outcome.is_reserved(),
                        "result": outcome,
                        "message": outcome.message(),
                    }))?,
                }
                Ok(())
            }
            Step::Available => {
                let available = self.service.num_seats_available();
                match self.format {
                    OutputFormat::Human => writeln!(self.out, "{available}")?,
                    OutputFormat::Json => self.emit_json(&serde_json::json!({
                        "step": step.name(),
                        "available": available,
                    }))?,
                }
                Ok(())
            }
            Step::Status => {
                let snapshot = self.service.venue_status();
                let available = self.service.num_seats_available();
                match self.format {
                    OutputFormat::Human => write_venue(&mut self.out, &snapshot, available)?,
                    OutputFormat::Json => self.emit_json(&serde_json::json!({
                        "step": step.name(),
                        "venue": snapshot,
                    }))?,
                }
                Ok(())
            }
            Step::Holds => {
                let holds = self.service.active_holds();
                match self.format {
                    OutputFormat::Human if holds.is_empty() => {
                        writeln!(self.out, "no active holds")?;
                    }
                    OutputFormat::Human => {
                        for hold in &holds {
                            writeln!(self.out, "{}", describe_hold(hold))?;
                        }
                    }
                    OutputFormat::Json => self.emit_json(&serde_json::json!({
                        "step": step.name(),
                        "holds": holds.iter().map(hold_json).collect::<Vec<_>>(),
                    }))?,
                }
                Ok(())
            }
            Step::Wait(duration) => {
                log::debug!("session waiting {duration:?}");
                thread::sleep(*duration);
                Ok(())
            }
        }
    }

    fn emit_hold(&mut self, step: &Step, outcome: &HoldOutcome) -> Result<(), CliError> {
        match (self.format, outcome) {
            (OutputFormat::Human, HoldOutcome::Held(hold)) => {
                writeln!(self.out, "{}", describe_hold(hold))?;
            }
            (OutputFormat::Human, HoldOutcome::Rejected(rejection)) => {
                writeln!(self.out, "{rejection}")?;
            }
            (OutputFormat::Json, HoldOutcome::Held(hold)) => self.emit_json(&serde_json::json!({
                "step": step.name(),
                "held": true,
                "hold": hold_json(hold),
            }))?,
            (OutputFormat::Json, HoldOutcome::Rejected(rejection)) => {
                self.emit_json(&serde_json::json!({
                    "step": step.name(),
                    "held": false,
                    "rejection": rejection,
                    "message": rejection.message(),
                }))?;
            }
        }
        Ok(())
    }

    fn emit_json(&mut self, value: &serde_json::Value) -> Result<(), CliError> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

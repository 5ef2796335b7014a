//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is either an InboundEvent or a control line
//! (`{"command":"snapshot"}` / `{"command":"clear"}`). Output lines are either:
//! - A Summary (on a snapshot command, and once more at end of input)
//! - An ErrorOutput (when input validation fails)
//!
//! Events that are ingested or skipped as duplicates produce no output line.

use leaderboard_engine::types::{Command, ControlLine, ErrorOutput};
use leaderboard_engine::{Config, EngineError, InboundEvent, Pipeline};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::error;

fn emit<W: Write, T: Serialize>(out: &mut W, value: &T) {
  let _ = serde_json::to_writer(&mut *out, value);
  let _ = writeln!(out);
}

fn main() {
  leaderboard_engine::init_tracing();

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let mut pipeline = Pipeline::new(Config::from_env());

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        error!(error = %e, "read error");
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    if let Ok(control) = serde_json::from_str::<ControlLine>(trimmed) {
      match control.command {
        Command::Snapshot => emit(&mut out, &pipeline.snapshot()),
        Command::Clear => pipeline.clear(),
      }
      continue;
    }

    let raw: InboundEvent = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        emit(&mut out, &ErrorOutput::new(EngineError::from(e).to_string()));
        continue;
      }
    };

    if let Err(e) = pipeline.process(&raw) {
      let err = match &e {
        EngineError::Invalid(inner) => {
          ErrorOutput::new(inner.reason.clone()).with_field(inner.field.clone())
        }
        _ => ErrorOutput::new(e.to_string()),
      };
      emit(&mut out, &err);
    }
  }

  emit(&mut out, &pipeline.snapshot());
  let _ = out.flush();
}

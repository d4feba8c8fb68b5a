//! Binary entrypoint: read one JSON object from stdin, write one to stdout.
//!
//! Exit 0 with an `Output` object on success. On bad input or a failed post-condition,
//! exit 1 with an `ErrorOutput` object. Each object goes out in a single write; logs go to
//! stderr only.

use risk_engine::{check_output, run, EngineError, ErrorOutput, Input};
use serde::Deserialize;
use std::io::{self, Write};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Harness progress, for logging where a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
  Idle,
  ReadingInput,
  Parsed,
  Computed,
  WroteOutput,
}

fn main() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .init();

  let mut stage = Stage::Idle;
  if let Err(e) = run_binary(&mut stage) {
    error!(?stage, error = %e, "risk-engine failed");
    // A failed stdout write may have left bytes behind; don't append to them.
    if stage < Stage::Computed {
      write_error(&e);
    }
    std::process::exit(1);
  }
  debug!(?stage, "done");
}

fn run_binary(stage: &mut Stage) -> Result<(), EngineError> {
  *stage = Stage::ReadingInput;
  // Exactly one JSON value; nothing after it is consumed.
  let stdin = io::stdin();
  let mut de = serde_json::Deserializer::from_reader(stdin.lock());
  let value = serde_json::Value::deserialize(&mut de)?;
  let input = Input::from_value(value)?;
  *stage = Stage::Parsed;
  debug!(files = input.files_changed.len(), churn = input.churn(), "input parsed");

  let out = run(&input);
  check_output(&input, &out)?;
  let json = serde_json::to_vec(&out)?;
  *stage = Stage::Computed;

  let mut stdout = io::stdout().lock();
  stdout.write_all(&json)?;
  stdout.flush()?;
  *stage = Stage::WroteOutput;
  Ok(())
}

fn write_error(e: &EngineError) {
  let mut err = ErrorOutput::new(e.to_string());
  if let Some(field) = e.field() {
    err = err.with_field(field);
  }
  if let Ok(json) = serde_json::to_vec(&err) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(&json);
    let _ = stdout.flush();
  }
}

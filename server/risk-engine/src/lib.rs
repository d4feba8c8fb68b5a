//! PushLog Risk Engine — rule-based scoring; no AI, no DB, no network.
//! Used by the binary for stdin/stdout; can also be called as a library.
//!
//! Pipeline: risk flags (paths) -> change types (message, paths) -> score, hotspots,
//! explanations. Same input, same output: no clock, no randomness, no global state.

pub mod change_type;
pub mod config;
pub mod error;
pub mod normalize;
pub mod risk;
pub mod score;
pub mod types;

pub use config::Config;
pub use error::EngineError;
pub use types::{ChangeType, ErrorOutput, Input, Output, RiskFlag};

use std::collections::HashSet;
use std::hash::Hash;

use tracing::warn;

/// Run the engine with default tuning (no I/O).
pub fn run(input: &Input) -> Output {
  run_with_config(input, &Config::default())
}

/// Run the engine with explicit tuning (no I/O).
pub fn run_with_config(input: &Input, config: &Config) -> Output {
  let risk = risk::compute_risk_flags(&input.files_changed);
  let types = change_type::compute_change_type_tags(input);
  let impact_score = score::compute_impact_score(input, &risk, &types, config);
  let hotspot_files =
    score::compute_hotspot_files(&input.files_changed, &risk, config.max_hotspots.min(10));
  let explanations = score::compute_explanations(input, &risk, &types, config);

  Output {
    impact_score,
    risk_flags: risk.flags(),
    change_type_tags: types.tags,
    hotspot_files,
    explanations,
  }
}

/// Verify output post-conditions before it leaves the process.
pub fn check_output(input: &Input, out: &Output) -> Result<(), EngineError> {
  let result = check_output_inner(input, out);
  if let Err(e) = &result {
    warn!(error = %e, "output failed post-condition check");
  }
  result
}

fn check_output_inner(input: &Input, out: &Output) -> Result<(), EngineError> {
  if out.impact_score > 100 {
    return Err(EngineError::invariant(
      "impact_score",
      format!("{} exceeds 100", out.impact_score),
    ));
  }
  if has_duplicates(&out.risk_flags) {
    return Err(EngineError::invariant("risk_flags", "duplicate flag"));
  }
  if has_duplicates(&out.change_type_tags) {
    return Err(EngineError::invariant("change_type_tags", "duplicate tag"));
  }
  if out.hotspot_files.len() > 10 {
    return Err(EngineError::invariant(
      "hotspot_files",
      format!("{} entries, max 10", out.hotspot_files.len()),
    ));
  }
  if has_duplicates(&out.hotspot_files) {
    return Err(EngineError::invariant("hotspot_files", "duplicate path"));
  }
  let inputs: HashSet<&str> = input.files_changed.iter().map(String::as_str).collect();
  if let Some(stray) = out
    .hotspot_files
    .iter()
    .find(|f| !inputs.contains(f.as_str()))
  {
    return Err(EngineError::invariant(
      "hotspot_files",
      format!("{} not in files_changed", stray),
    ));
  }
  Ok(())
}

fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
  let mut seen = HashSet::with_capacity(items.len());
  !items.iter().all(|item| seen.insert(item))
}

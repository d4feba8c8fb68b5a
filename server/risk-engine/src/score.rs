//! Impact score, hotspot files, and human-readable explanations.
//!
//! Score = churn sub-score (0..=60, saturating log curve)
//!       + risk sub-score (0..=35, flag weights summed in flag order)
//!       + change-type modifier (-5..=5),
//! clamped to 0..=100 and rounded once at the end.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::Config;
use crate::types::{ChangeType, ChangeTypes, Input, RiskAssessment, RiskFlag};

/// Churn sub-score: `max * ln(1 + churn) / ln(1 + saturation)`, capped at `max`.
pub fn churn_subscore(churn: u64, config: &Config) -> f64 {
  if churn == 0 || config.churn_saturation_lines == 0 {
    return 0.0;
  }
  let curve = (churn as f64).ln_1p() / (config.churn_saturation_lines as f64).ln_1p();
  (config.churn_max_points * curve).min(config.churn_max_points)
}

/// Risk sub-score: distinct flag weights in `RiskFlag` order, capped.
pub fn risk_subscore(risk: &RiskAssessment, config: &Config) -> u8 {
  let total: u32 = risk
    .hits
    .iter()
    .map(|h| u32::from(config.risk_weight(h.flag)))
    .sum();
  total.min(u32::from(config.risk_max_points)) as u8
}

/// Change-type modifier. Only uses facts that do not depend on churn direction, so the
/// score stays monotonic in churn.
pub fn type_modifier(risk: &RiskAssessment, types: &ChangeTypes, config: &Config) -> i32 {
  let mut modifier = 0;
  if types.only(ChangeType::Tests) || types.only(ChangeType::Docs) {
    modifier -= 5;
  }
  if risk.has(RiskFlag::Migration) && types.declared(ChangeType::Feature) {
    modifier += 5;
  }
  let sensitive = [RiskFlag::Auth, RiskFlag::Secrets, RiskFlag::Payment]
    .iter()
    .any(|&f| risk.has(f));
  if sensitive && types.declared(ChangeType::Fix) {
    modifier += 3;
  }
  let bound = config.modifier_max_points.saturating_abs();
  modifier.clamp(-bound, bound)
}

/// Impact 0–100 from churn, risk flags and change types.
pub fn compute_impact_score(
  input: &Input,
  risk: &RiskAssessment,
  types: &ChangeTypes,
  config: &Config,
) -> u8 {
  let churn_points = churn_subscore(input.churn(), config);
  let risk_points = f64::from(risk_subscore(risk, config));
  let base = churn_points + risk_points;

  // The modifier alone never crosses 0 or 100.
  let modifier = f64::from(type_modifier(risk, types, config))
    .max(-base)
    .min(100.0 - base);

  let score = (base + modifier).round().clamp(0.0, 100.0) as u8;
  debug!(
    churn = input.churn(),
    churn_points,
    risk_points,
    modifier,
    score,
    "impact score computed"
  );
  score
}

/// Up to `n` distinct files: risk-triggering files first (by their most severe flag),
/// then everything else in input order.
pub fn compute_hotspot_files(files: &[String], risk: &RiskAssessment, n: usize) -> Vec<String> {
  let mut severity: HashMap<&str, u8> = HashMap::new();
  for hit in &risk.hits {
    let s = hit.flag.severity();
    for f in &hit.files {
      let entry = severity.entry(f.as_str()).or_insert(0);
      *entry = (*entry).max(s);
    }
  }

  let mut seen: HashSet<&str> = HashSet::with_capacity(files.len());
  let mut ranked: Vec<(u8, &String)> = Vec::new();
  for f in files {
    if seen.insert(f.as_str()) {
      ranked.push((severity.get(f.as_str()).copied().unwrap_or(0), f));
    }
  }

  // Stable sort keeps input order among equal severities.
  ranked.sort_by(|a, b| b.0.cmp(&a.0));

  ranked.into_iter().take(n).map(|(_, f)| f.clone()).collect()
}

fn flag_sentence(flag: RiskFlag) -> &'static str {
  match flag {
    RiskFlag::Deps => "Touched dependency lockfiles or package manifests",
    RiskFlag::Migration => "Schema or migration changes",
    RiskFlag::Auth => "Auth or permission-related files changed",
    RiskFlag::Config => "Config or environment-related files changed",
    RiskFlag::Secrets => "Possible secrets or credentials area",
    RiskFlag::Payment => "Payment or billing-related code changed",
  }
}

fn type_sentence(tag: ChangeType, from_churn: bool) -> &'static str {
  match (tag, from_churn) {
    (ChangeType::Feature, true) => "Mostly added lines; looks like new functionality",
    (ChangeType::Fix, true) => "Deletions match or exceed additions; looks like a fix or cleanup",
    (ChangeType::Feature, false) => "New feature",
    (ChangeType::Fix, false) => "Bug fix",
    (ChangeType::Docs, _) => "Documentation changed",
    (ChangeType::Tests, _) => "Test files changed",
    (ChangeType::Refactor, _) => "Refactor; behavior should be unchanged",
    (ChangeType::Chore, _) => "Maintenance or tooling chore",
    (ChangeType::Performance, _) => "Performance-related change",
  }
}

/// Short human-readable reasons: risk flags, then change types, then churn magnitude.
pub fn compute_explanations(
  input: &Input,
  risk: &RiskAssessment,
  types: &ChangeTypes,
  config: &Config,
) -> Vec<String> {
  let mut out = Vec::new();

  for hit in &risk.hits {
    let Some(example) = hit.files.first() else {
      continue;
    };
    let more = hit.files.len() - 1;
    let s = if more == 0 {
      format!("{}: {} (e.g. {})", hit.flag.as_str(), flag_sentence(hit.flag), example)
    } else {
      format!(
        "{}: {} (e.g. {} and {} more)",
        hit.flag.as_str(),
        flag_sentence(hit.flag),
        example,
        more
      )
    };
    out.push(s);
  }

  for &tag in &types.tags {
    let from_churn = types.churn_default == Some(tag);
    out.push(type_sentence(tag, from_churn).to_string());
  }

  let churn = input.churn();
  if churn >= config.large_churn_lines {
    out.push(format!(
      "Large change: {} lines touched (+{} / -{})",
      churn, input.additions, input.deletions
    ));
  }

  out
}

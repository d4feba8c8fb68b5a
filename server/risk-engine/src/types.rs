//! Input/output types for the risk engine (JSON contract with Node) plus the closed
//! flag/tag vocabularies and the classifier results passed to the scorer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Inbound (what Node sends)
// ---------------------------------------------------------------------------

/// Input: one JSON object from Node (matches webhook pushData). Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
  pub commit_message: String,
  pub files_changed: Vec<String>,
  pub additions: u64,
  pub deletions: u64,
  #[serde(default)]
  #[allow(dead_code)] // reserved for future diff-based rules
  pub diff_text: Option<String>,
}

impl Input {
  /// Deserialize an already-parsed JSON value, naming the first missing or mistyped field.
  pub fn from_value(value: Value) -> Result<Self, EngineError> {
    let field = offending_field(&value);
    serde_json::from_value(value).map_err(|e| match field {
      Some(f) => EngineError::validation(f, &e.to_string()),
      None => EngineError::Json(e),
    })
  }

  /// Total line churn (additions + deletions).
  pub fn churn(&self) -> u64 {
    self.additions.saturating_add(self.deletions)
  }
}

/// First field of `value` that is missing or has the wrong shape for `Input`.
fn offending_field(value: &Value) -> Option<&'static str> {
  let obj = value.as_object()?;
  let checks: [(&'static str, bool, fn(&Value) -> bool); 5] = [
    ("commit_message", true, Value::is_string),
    ("files_changed", true, |v| {
      v.as_array().is_some_and(|a| a.iter().all(Value::is_string))
    }),
    ("additions", true, Value::is_u64),
    ("deletions", true, Value::is_u64),
    ("diff_text", false, |v| v.is_null() || v.is_string()),
  ];
  checks
    .into_iter()
    .find(|(name, required, ok)| match obj.get(*name) {
      Some(v) => !ok(v),
      None => *required,
    })
    .map(|(name, _, _)| name)
}

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Risk categories. Declaration order is the output order and the weight summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFlag {
  Deps,
  Migration,
  Auth,
  Config,
  Secrets,
  Payment,
}

impl RiskFlag {
  pub const ALL: [RiskFlag; 6] = [
    RiskFlag::Deps,
    RiskFlag::Migration,
    RiskFlag::Auth,
    RiskFlag::Config,
    RiskFlag::Secrets,
    RiskFlag::Payment,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Deps => "deps",
      Self::Migration => "migration",
      Self::Auth => "auth",
      Self::Config => "config",
      Self::Secrets => "secrets",
      Self::Payment => "payment",
    }
  }

  /// Hotspot ranking severity; higher surfaces first.
  pub fn severity(self) -> u8 {
    match self {
      Self::Secrets => 6,
      Self::Auth => 5,
      Self::Payment => 4,
      Self::Migration => 3,
      Self::Config => 2,
      Self::Deps => 1,
    }
  }
}

/// Nature of the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
  Feature,
  Fix,
  Docs,
  Tests,
  Refactor,
  Chore,
  Performance,
}

impl ChangeType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Feature => "feature",
      Self::Fix => "fix",
      Self::Docs => "docs",
      Self::Tests => "tests",
      Self::Refactor => "refactor",
      Self::Chore => "chore",
      Self::Performance => "performance",
    }
  }
}

// ---------------------------------------------------------------------------
// Classifier results (internal)
// ---------------------------------------------------------------------------

/// One fired risk flag and the input paths that triggered it, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagHit {
  pub flag: RiskFlag,
  pub files: Vec<String>,
}

/// Risk classifier output; `hits` is in `RiskFlag` declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskAssessment {
  pub hits: Vec<FlagHit>,
}

impl RiskAssessment {
  pub fn flags(&self) -> Vec<RiskFlag> {
    self.hits.iter().map(|h| h.flag).collect()
  }

  pub fn has(&self, flag: RiskFlag) -> bool {
    self.hits.iter().any(|h| h.flag == flag)
  }

  pub fn is_empty(&self) -> bool {
    self.hits.is_empty()
  }
}

/// Where the change-type tags came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagSource {
  /// Conventional-commit markers in the message.
  Message,
  /// Inferred from paths (and churn direction for the default tag).
  #[default]
  Paths,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTypes {
  pub tags: Vec<ChangeType>,
  pub source: TagSource,
  /// Tag chosen purely from churn direction (feature vs fix), if any.
  pub churn_default: Option<ChangeType>,
}

impl ChangeTypes {
  pub fn has(&self, tag: ChangeType) -> bool {
    self.tags.contains(&tag)
  }

  /// True when the tag was declared in the commit message.
  pub fn declared(&self, tag: ChangeType) -> bool {
    self.source == TagSource::Message && self.has(tag)
  }

  /// True when the only tag is `tag`.
  pub fn only(&self, tag: ChangeType) -> bool {
    self.tags.len() == 1 && self.tags[0] == tag
  }
}

// ---------------------------------------------------------------------------
// Outbound (what we emit)
// ---------------------------------------------------------------------------

/// Output: one JSON object to stdout for Node to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
  pub impact_score: u8,
  pub risk_flags: Vec<RiskFlag>,
  pub change_type_tags: Vec<ChangeType>,
  pub hotspot_files: Vec<String>,
  pub explanations: Vec<String>,
}

/// Minimal error object written to stdout when a request cannot be scored.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

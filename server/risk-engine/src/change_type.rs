//! Change type tags derived from commit message and file paths.

use tracing::debug;

use crate::normalize::{file_name, normalize_path};
use crate::types::{ChangeType, ChangeTypes, Input, TagSource};

/// Map a conventional-commit type word to its tag.
fn marker_tag(word: &str) -> Option<ChangeType> {
  match word {
    "feat" | "feature" => Some(ChangeType::Feature),
    "fix" | "bugfix" | "hotfix" => Some(ChangeType::Fix),
    "docs" | "doc" => Some(ChangeType::Docs),
    "test" | "tests" => Some(ChangeType::Tests),
    "refactor" => Some(ChangeType::Refactor),
    "chore" => Some(ChangeType::Chore),
    "perf" => Some(ChangeType::Performance),
    _ => None,
  }
}

/// Leading alphabetic word, so "fix(api)!:" yields "fix" and "fixture" stays "fixture".
fn leading_word(s: &str) -> &str {
  let s = s.trim_start();
  let end = s
    .find(|c: char| !c.is_ascii_alphabetic())
    .unwrap_or(s.len());
  &s[..end]
}

/// Tags from markers at the start of the message or right after any `:`.
fn message_tags(commit_message: &str) -> Vec<ChangeType> {
  let msg = commit_message.to_lowercase();
  let mut tags = Vec::new();
  let candidates = std::iter::once(msg.as_str()).chain(msg.split(':').skip(1));
  for candidate in candidates {
    if let Some(tag) = marker_tag(leading_word(candidate)) {
      if !tags.contains(&tag) {
        tags.push(tag);
      }
    }
  }
  tags
}

pub fn is_test_path(normalized: &str) -> bool {
  normalized.contains("test") || normalized.contains("spec") || normalized.contains("__tests__")
}

pub fn is_doc_path(normalized: &str) -> bool {
  normalized.ends_with(".md")
    || normalized.ends_with(".mdx")
    || normalized.ends_with(".rst")
    || normalized.starts_with("docs/")
    || normalized.starts_with("doc/")
    || normalized.contains("/docs/")
    || file_name(normalized).starts_with("readme")
}

/// Change type tags from commit message, falling back to paths and churn direction.
pub fn compute_change_type_tags(input: &Input) -> ChangeTypes {
  let from_message = message_tags(&input.commit_message);
  if !from_message.is_empty() {
    debug!(tags = ?from_message, "change types from commit message");
    return ChangeTypes {
      tags: from_message,
      source: TagSource::Message,
      churn_default: None,
    };
  }

  let paths: Vec<String> = input
    .files_changed
    .iter()
    .map(|p| normalize_path(p))
    .collect();
  let mut tags = Vec::new();

  if paths.iter().any(|p| is_test_path(p)) {
    tags.push(ChangeType::Tests);
  }
  if !paths.is_empty() && paths.iter().all(|p| is_doc_path(p)) {
    tags.push(ChangeType::Docs);
  }

  let has_source = paths.iter().any(|p| !is_test_path(p) && !is_doc_path(p));
  let churn_default = if has_source {
    let tag = if input.additions > input.deletions {
      ChangeType::Feature
    } else {
      ChangeType::Fix
    };
    tags.push(tag);
    Some(tag)
  } else {
    None
  };

  debug!(tags = ?tags, "change types inferred from paths");
  ChangeTypes {
    tags,
    source: TagSource::Paths,
    churn_default,
  }
}

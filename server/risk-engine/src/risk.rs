//! Risk flags derived from file path patterns.

use std::collections::HashSet;

use tracing::debug;

use crate::normalize::{file_name, normalize_path};
use crate::types::{FlagHit, RiskAssessment, RiskFlag};

/// Lockfiles and module manifests, matched against the final path segment.
const DEPS_FILES: &[&str] = &[
  "package-lock.json",
  "npm-shrinkwrap.json",
  "yarn.lock",
  "pnpm-lock.yaml",
  "bun.lockb",
  "pipfile.lock",
  "poetry.lock",
  "cargo.lock",
  "gemfile.lock",
  "composer.lock",
  "go.mod",
  "go.sum",
];

const MIGRATION_PATTERNS: &[&str] = &["migration", "schema", "prisma"];
const AUTH_PATTERNS: &[&str] = &["auth", "jwt", "oauth", "session", "acl", "permission"];
const CONFIG_PATTERNS: &[&str] = &["config", "secret", "key", "credential"];
const SECRETS_PATTERNS: &[&str] = &["secret", "password", "api_key", "apikey"];
const PAYMENT_PATTERNS: &[&str] = &["payment", "stripe", "billing", "invoice"];

fn contains_any(path: &str, patterns: &[&str]) -> bool {
  patterns.iter().any(|p| path.contains(p))
}

/// Does a normalized path trigger `flag`?
pub fn matches(flag: RiskFlag, path: &str) -> bool {
  match flag {
    RiskFlag::Deps => DEPS_FILES.contains(&file_name(path)),
    RiskFlag::Migration => contains_any(path, MIGRATION_PATTERNS),
    RiskFlag::Auth => contains_any(path, AUTH_PATTERNS),
    RiskFlag::Config => {
      path.starts_with(".env")
        || file_name(path).starts_with(".env")
        || contains_any(path, CONFIG_PATTERNS)
    }
    RiskFlag::Secrets => contains_any(path, SECRETS_PATTERNS),
    RiskFlag::Payment => contains_any(path, PAYMENT_PATTERNS),
  }
}

/// Classify paths into risk flags.
///
/// Flags come out in `RiskFlag` declaration order regardless of file order; each hit keeps
/// the original (un-normalized) paths that triggered it, first occurrence only.
pub fn compute_risk_flags(files: &[String]) -> RiskAssessment {
  let normalized: Vec<String> = files.iter().map(|f| normalize_path(f)).collect();

  let hits: Vec<FlagHit> = RiskFlag::ALL
    .iter()
    .filter_map(|&flag| {
      let mut seen: HashSet<&str> = HashSet::new();
      let mut triggered: Vec<String> = Vec::new();
      for (raw, path) in files.iter().zip(&normalized) {
        if matches(flag, path) && seen.insert(raw.as_str()) {
          triggered.push(raw.clone());
        }
      }
      if triggered.is_empty() {
        None
      } else {
        Some(FlagHit {
          flag,
          files: triggered,
        })
      }
    })
    .collect();

  debug!(
    flags = ?hits.iter().map(|h| h.flag.as_str()).collect::<Vec<_>>(),
    files = files.len(),
    "risk flags computed"
  );

  RiskAssessment { hits }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paths(ps: &[&str]) -> Vec<String> {
    ps.iter().map(|p| p.to_string()).collect()
  }

  #[test]
  fn empty_input_no_flags() {
    assert!(compute_risk_flags(&[]).is_empty());
  }

  #[test]
  fn lockfiles_flag_deps() {
    for f in ["package-lock.json", "web/yarn.lock", "Cargo.lock", "Pipfile.lock", "go.mod", "svc/go.sum"] {
      let r = compute_risk_flags(&paths(&[f]));
      assert_eq!(r.flags(), vec![RiskFlag::Deps], "{}", f);
    }
  }

  #[test]
  fn lockfile_name_must_be_exact() {
    let r = compute_risk_flags(&paths(&["docs/cargo.lock.md", "src/go.model.ts"]));
    assert!(!r.has(RiskFlag::Deps));
  }

  #[test]
  fn one_path_many_flags() {
    let r = compute_risk_flags(&paths(&["config/secrets.yaml"]));
    assert!(r.has(RiskFlag::Config));
    assert!(r.has(RiskFlag::Secrets));
  }

  #[test]
  fn dotenv_is_config() {
    let r = compute_risk_flags(&paths(&[".env.production"]));
    assert_eq!(r.flags(), vec![RiskFlag::Config]);
    let r = compute_risk_flags(&paths(&["deploy/.env"]));
    assert_eq!(r.flags(), vec![RiskFlag::Config]);
  }

  #[test]
  fn directory_segments_count_and_case_ignored() {
    let r = compute_risk_flags(&paths(&["SRC/Payments/Handler.ts", "db\\Migrations\\001.sql"]));
    assert_eq!(r.flags(), vec![RiskFlag::Migration, RiskFlag::Payment]);
  }

  #[test]
  fn flag_order_follows_table_not_files() {
    let a = compute_risk_flags(&paths(&["stripe/webhook.ts", "src/auth/jwt.go", "package-lock.json"]));
    let b = compute_risk_flags(&paths(&["package-lock.json", "src/auth/jwt.go", "stripe/webhook.ts"]));
    assert_eq!(a.flags(), vec![RiskFlag::Deps, RiskFlag::Auth, RiskFlag::Payment]);
    assert_eq!(a.flags(), b.flags());
  }

  #[test]
  fn hit_files_keep_input_order_and_dedupe() {
    let r = compute_risk_flags(&paths(&["src/auth/b.ts", "src/auth/a.ts", "src/auth/b.ts"]));
    assert_eq!(r.hits.len(), 1);
    assert_eq!(r.hits[0].files, paths(&["src/auth/b.ts", "src/auth/a.ts"]));
  }

  #[test]
  fn large_push_dedupes_hit_files() {
    let files: Vec<String> = (0..50_000)
      .map(|i| format!("src/auth/handler{}.ts", i % 25_000))
      .collect();
    let r = compute_risk_flags(&files);
    assert_eq!(r.flags(), vec![RiskFlag::Auth]);
    assert_eq!(r.hits[0].files.len(), 25_000);
    assert_eq!(r.hits[0].files[0], "src/auth/handler0.ts");
    assert_eq!(r.hits[0].files[24_999], "src/auth/handler24999.ts");
  }

  #[test]
  fn plain_source_no_flags() {
    let r = compute_risk_flags(&paths(&["src/handler.ts", "README.md"]));
    assert!(r.is_empty());
  }
}

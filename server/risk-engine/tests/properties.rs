//! Property tests: determinism, bounds, hotspot subset law, monotonicity, order-independence.

use proptest::prelude::*;
use risk_engine::{run, Input};

fn path() -> impl Strategy<Value = String> {
  let segment = prop::sample::select(vec![
    "src", "auth", "docs", "tests", "billing", "config", "db", "migrations", "lib", "README.md",
    "Cargo.lock", "go.sum", ".env", "secret.yml", "jwt.go", "main.rs", "spec", "api_key.txt",
  ]);
  prop::collection::vec(segment, 1..4).prop_map(|segs| segs.join("/"))
}

fn message() -> impl Strategy<Value = String> {
  prop::sample::select(vec![
    "", "feat: add thing", "fix(api): bug", "docs: readme", "test: more", "chore: bump",
    "refactor: split", "perf: faster", "wip", "Merge: fix: docs: typo",
  ])
  .prop_map(String::from)
}

prop_compose! {
  fn request()(
    commit_message in message(),
    files_changed in prop::collection::vec(path(), 0..25),
    additions in 0u64..50_000,
    deletions in 0u64..50_000,
  ) -> Input {
    Input { commit_message, files_changed, additions, deletions, diff_text: None }
  }
}

proptest! {
  #[test]
  fn deterministic(input in request()) {
    let a = serde_json::to_vec(&run(&input)).unwrap();
    let b = serde_json::to_vec(&run(&input)).unwrap();
    prop_assert_eq!(a, b);
  }

  #[test]
  fn score_in_bounds(input in request()) {
    prop_assert!(run(&input).impact_score <= 100);
  }

  #[test]
  fn hotspots_are_distinct_subset(input in request()) {
    let out = run(&input);
    let mut distinct = input.files_changed.clone();
    distinct.sort();
    distinct.dedup();
    prop_assert!(out.hotspot_files.len() <= distinct.len().min(10));
    for (i, f) in out.hotspot_files.iter().enumerate() {
      prop_assert!(input.files_changed.contains(f));
      prop_assert!(!out.hotspot_files[..i].contains(f));
    }
  }

  #[test]
  fn more_churn_never_lowers_score(input in request(), extra_add in 0u64..10_000, extra_del in 0u64..10_000) {
    let bigger = Input {
      additions: input.additions + extra_add,
      deletions: input.deletions + extra_del,
      ..input.clone()
    };
    prop_assert!(run(&bigger).impact_score >= run(&input).impact_score);
  }

  #[test]
  fn flags_ignore_file_order(input in request()) {
    let mut reversed = input.clone();
    reversed.files_changed.reverse();
    prop_assert_eq!(run(&input).risk_flags, run(&reversed).risk_flags);
  }
}

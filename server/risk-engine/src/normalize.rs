//! Path normalization shared by the classifiers.

/// Normalize a file path for pattern matching:
/// - backslash -> forward slash
/// - collapse repeated slashes
/// - strip leading ./
/// - lowercase
pub fn normalize_path(p: &str) -> String {
  let s = p.replace('\\', "/");
  let mut out = String::with_capacity(s.len());
  let mut prev_slash = false;
  for ch in s.chars() {
    if ch == '/' {
      if !prev_slash {
        out.push('/');
      }
      prev_slash = true;
    } else {
      prev_slash = false;
      out.push(ch);
    }
  }
  let mut trimmed = out.as_str();
  while let Some(rest) = trimmed.strip_prefix("./") {
    trimmed = rest;
  }
  trimmed.to_lowercase()
}

/// Final path segment of an already-normalized path.
pub fn file_name(normalized: &str) -> &str {
  normalized.rsplit('/').next().unwrap_or(normalized)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_path_basics() {
    assert_eq!(normalize_path("src\\auth\\jwt.go"), "src/auth/jwt.go");
    assert_eq!(normalize_path("./src//utils/index.ts"), "src/utils/index.ts");
    assert_eq!(normalize_path("SRC/App.tsx"), "src/app.tsx");
    assert_eq!(normalize_path("././Cargo.lock"), "cargo.lock");
  }

  #[test]
  fn file_name_last_segment() {
    assert_eq!(file_name("a/b/cargo.lock"), "cargo.lock");
    assert_eq!(file_name("go.mod"), "go.mod");
    assert_eq!(file_name(""), "");
  }
}

#![forbid(unsafe_code)]

//! Golden checksums for rendered markup.
//!
//! Each case stores the BLAKE3 checksums of its rendered passes in
//! `<base>/tests/golden/<case>.checksums`, one per line. Lines starting with
//! `#` are comments.
//!
//! Set `BLESS=1` to write the current checksums instead of comparing:
//!
//! ```sh
//! BLESS=1 cargo test -p tdom-harness golden
//! ```
//!
//! Missing golden files pass unless `TDOM_GOLDEN_ENFORCE=1` or `CI=1`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HarnessError;
use crate::session::Rendered;

/// BLAKE3 checksum prefix.
pub const CHECKSUM_PREFIX: &str = "blake3:";

/// Checksum of a markup string, hex-encoded and prefixed with `blake3:`.
pub fn compute_markup_checksum(markup: &str) -> String {
    format!("{CHECKSUM_PREFIX}{}", blake3::hash(markup.as_bytes()).to_hex())
}

/// Path of the golden file for `case`.
pub fn golden_checksum_path(base_dir: &Path, case: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("golden")
        .join(format!("{case}.checksums"))
}

/// Load expected checksums. A missing file yields an empty list.
pub fn load_golden_checksums(path: &Path) -> Result<Vec<String>, HarnessError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(HarnessError::Io(e)),
    }
}

/// Write checksums, creating parent directories.
pub fn save_golden_checksums(path: &Path, checksums: &[String]) -> Result<(), HarnessError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = format!(
        "# Golden checksums - regenerate with BLESS=1\n{}\n",
        checksums.join("\n")
    );
    fs::write(path, content)?;
    Ok(())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Whether golden files should be rewritten.
pub fn is_bless_mode() -> bool {
    env_flag("BLESS")
}

/// Whether a missing golden file counts as a failure.
pub fn is_golden_enforced() -> bool {
    env_flag("TDOM_GOLDEN_ENFORCE") || env_flag("CI")
}

/// Outcome of a golden comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenOutcome {
    Pass,
    Fail,
    /// Checksums were written instead of compared.
    Blessed,
}

/// Result of checking one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenResult {
    pub case: String,
    pub outcome: GoldenOutcome,
    pub checksums: Vec<String>,
    pub expected: Vec<String>,
    pub mismatch_index: Option<usize>,
}

impl GoldenResult {
    pub fn is_pass(&self) -> bool {
        self.outcome != GoldenOutcome::Fail
    }

    /// Human-readable summary.
    pub fn format(&self) -> String {
        match self.outcome {
            GoldenOutcome::Pass => format!("PASS: {}", self.case),
            GoldenOutcome::Blessed => format!("BLESSED: {} ({} passes)", self.case, self.checksums.len()),
            GoldenOutcome::Fail => match self.mismatch_index {
                _ if self.expected.is_empty() => {
                    format!("FAIL: {} - missing golden checksums", self.case)
                }
                Some(idx) => format!(
                    "FAIL: {} - checksum mismatch at pass {idx}\n  expected: {}\n  actual: {}",
                    self.case,
                    self.expected.get(idx).map_or("<none>", String::as_str),
                    self.checksums.get(idx).map_or("<none>", String::as_str),
                ),
                None => format!(
                    "FAIL: {} - expected {} passes, got {}",
                    self.case,
                    self.expected.len(),
                    self.checksums.len()
                ),
            },
        }
    }
}

/// Compare actual checksums with expected ones.
pub fn verify_checksums(actual: &[String], expected: &[String]) -> (GoldenOutcome, Option<usize>) {
    if expected.is_empty() {
        if is_golden_enforced() {
            return (GoldenOutcome::Fail, None);
        }
        return (GoldenOutcome::Pass, None);
    }
    if let Some(idx) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        return (GoldenOutcome::Fail, Some(idx));
    }
    if actual.len() != expected.len() {
        return (GoldenOutcome::Fail, None);
    }
    (GoldenOutcome::Pass, None)
}

/// Check or bless the checksums of a sequence of rendered passes.
pub fn check_golden<Msg>(
    base_dir: &Path,
    case: &str,
    passes: &[Rendered<Msg>],
) -> Result<GoldenResult, HarnessError> {
    check_golden_with(base_dir, case, passes, is_bless_mode())
}

/// [`check_golden`] with an explicit bless flag.
pub fn check_golden_with<Msg>(
    base_dir: &Path,
    case: &str,
    passes: &[Rendered<Msg>],
    bless: bool,
) -> Result<GoldenResult, HarnessError> {
    let checksums: Vec<String> = passes.iter().map(Rendered::checksum).collect();
    let path = golden_checksum_path(base_dir, case);

    if bless {
        save_golden_checksums(&path, &checksums)?;
        tracing::info!(case, path = %path.display(), "golden checksums blessed");
        return Ok(GoldenResult {
            case: case.to_string(),
            outcome: GoldenOutcome::Blessed,
            expected: checksums.clone(),
            checksums,
            mismatch_index: None,
        });
    }

    let expected = load_golden_checksums(&path)?;
    let (outcome, mismatch_index) = verify_checksums(&checksums, &expected);
    if outcome == GoldenOutcome::Fail {
        tracing::warn!(case, ?mismatch_index, "golden checksum mismatch");
    }
    Ok(GoldenResult {
        case: case.to_string(),
        outcome,
        checksums,
        expected,
        mismatch_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_prefixed_hex() {
        let sum = compute_markup_checksum("<p>hi</p>");
        assert!(sum.starts_with(CHECKSUM_PREFIX));
        assert_eq!(sum.len(), CHECKSUM_PREFIX.len() + 64);
        assert!(sum[CHECKSUM_PREFIX.len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn checksum_is_deterministic_and_content_sensitive() {
        assert_eq!(compute_markup_checksum("a"), compute_markup_checksum("a"));
        assert_ne!(compute_markup_checksum("a"), compute_markup_checksum("b"));
    }

    #[test]
    fn verify_reports_first_mismatch() {
        let expected = vec!["x".to_string(), "y".to_string()];
        let actual = vec!["x".to_string(), "z".to_string()];
        assert_eq!(verify_checksums(&actual, &expected), (GoldenOutcome::Fail, Some(1)));
        assert_eq!(verify_checksums(&expected, &expected), (GoldenOutcome::Pass, None));
    }

    #[test]
    fn verify_reports_count_mismatch() {
        let expected = vec!["x".to_string()];
        let actual = vec!["x".to_string(), "y".to_string()];
        assert_eq!(verify_checksums(&actual, &expected), (GoldenOutcome::Fail, None));
    }

    #[test]
    fn save_then_load_skips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = golden_checksum_path(dir.path(), "case");
        let sums = vec![compute_markup_checksum("a"), compute_markup_checksum("b")];
        save_golden_checksums(&path, &sums).unwrap();
        assert_eq!(load_golden_checksums(&path).unwrap(), sums);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = golden_checksum_path(dir.path(), "absent");
        assert!(load_golden_checksums(&path).unwrap().is_empty());
    }

    #[test]
    fn format_mentions_case() {
        let result = GoldenResult {
            case: "menu".into(),
            outcome: GoldenOutcome::Fail,
            checksums: vec!["a".into()],
            expected: vec!["b".into()],
            mismatch_index: Some(0),
        };
        let text = result.format();
        assert!(text.starts_with("FAIL: menu"));
        assert!(text.contains("expected: b"));
        assert!(!result.is_pass());
    }
}

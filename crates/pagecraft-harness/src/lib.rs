#![forbid(unsafe_code)]

//! Outline snapshots of pagecraft frames.
//!
//! A frame is flattened to an indented outline (one node per line, see
//! [`outline`]) and compared with a stored `.snap` file. Outlines keep
//! class lists, attributes, and styles visible in a diff without the noise
//! of closing tags and quoting.
//!
//! ```ignore
//! use pagecraft_harness::assert_snapshot;
//!
//! #[test]
//! fn hero_grid_runtime() {
//!     let frame = PageRenderer::new(RenderMode::Runtime).render(&nodes);
//!     assert_snapshot!("hero_grid_runtime", &frame);
//! }
//! ```
//!
//! Snapshots live in `tests/snapshots/<name>.snap` under the calling
//! crate's `CARGO_MANIFEST_DIR`. Run with `BLESS=1` to write them.

pub mod cli;
pub mod outline;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pagecraft_render::Frame;

pub use outline::{frame_to_outline, node_to_outline};

/// Environment variable that switches assertions to recording.
pub const BLESS_ENV: &str = "BLESS";

/// Outline lines, with trailing spaces and trailing blank lines dropped.
/// Leading indentation is significant and kept.
fn outline_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// First differing line between two outlines, 1-based, with both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Compare two outlines. `None` when they match.
#[must_use]
pub fn compare_outlines(expected: &str, actual: &str) -> Option<Mismatch> {
    let expected = outline_lines(expected);
    let actual = outline_lines(actual);
    let len = expected.len().max(actual.len());
    (0..len).find_map(|i| {
        let (e, a) = (expected.get(i), actual.get(i));
        (e != a).then(|| Mismatch {
            line: i + 1,
            expected: e.map(|s| (*s).to_string()),
            actual: a.map(|s| (*s).to_string()),
        })
    })
}

/// Side-by-side listing of both outlines, marking lines that differ.
fn report(expected: &str, actual: &str) -> String {
    let expected = outline_lines(expected);
    let actual = outline_lines(actual);
    let mut out = String::new();
    for i in 0..expected.len().max(actual.len()) {
        match (expected.get(i), actual.get(i)) {
            (Some(e), Some(a)) if e == a => {
                let _ = writeln!(out, "{:>4}   {e}", i + 1);
            }
            (e, a) => {
                if let Some(e) = e {
                    let _ = writeln!(out, "{:>4} - {e}", i + 1);
                }
                if let Some(a) = a {
                    let _ = writeln!(out, "{:>4} + {a}", i + 1);
                }
            }
        }
    }
    out
}

/// A stored outline snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    name: String,
    path: PathBuf,
}

impl Snapshot {
    /// Snapshot `name` of the crate rooted at `manifest_dir`.
    #[must_use]
    pub fn new(manifest_dir: impl AsRef<Path>, name: &str) -> Self {
        let path = manifest_dir
            .as_ref()
            .join("tests")
            .join("snapshots")
            .join(format!("{name}.snap"));
        Self {
            name: name.to_string(),
            path,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compare `actual` with the stored outline, or record it when
    /// [`BLESS_ENV`] is set.
    ///
    /// # Panics
    ///
    /// When the snapshot is missing or differs and blessing is off, or when
    /// a blessed snapshot cannot be written.
    pub fn assert_matches(&self, actual: &str) {
        if blessing() {
            self.record(actual);
            return;
        }
        let expected = match std::fs::read_to_string(&self.path) {
            Ok(expected) => expected,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => panic!(
                "snapshot '{}' not found at {}; run with {BLESS_ENV}=1 to record it\n\n{actual}",
                self.name,
                self.path.display()
            ),
            Err(err) => panic!("cannot read snapshot {}: {err}", self.path.display()),
        };
        if let Some(mismatch) = compare_outlines(&expected, actual) {
            panic!(
                "snapshot '{}' differs at line {} ({})\n{BLESS_ENV}=1 re-records it.\n\n{}",
                self.name,
                mismatch.line,
                self.path.display(),
                report(&expected, actual)
            );
        }
    }

    fn record(&self, actual: &str) {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).expect("create snapshot directory");
        }
        let mut body = outline_lines(actual).join("\n");
        body.push('\n');
        std::fs::write(&self.path, body).expect("write snapshot");
    }
}

fn blessing() -> bool {
    std::env::var(BLESS_ENV).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Assert that the outline of `frame` matches snapshot `name`.
pub fn assert_frame_snapshot(manifest_dir: &str, name: &str, frame: &Frame) {
    Snapshot::new(manifest_dir, name).assert_matches(&frame_to_outline(frame));
}

/// Assert a frame against `tests/snapshots/<name>.snap` of the calling crate.
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $frame:expr) => {
        $crate::assert_frame_snapshot(env!("CARGO_MANIFEST_DIR"), $name, $frame)
    };
}

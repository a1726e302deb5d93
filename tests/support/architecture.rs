//! Source scanning for layering checks.

use std::fs;
use std::path::{Path, PathBuf};

/// `(path relative to the crate root, 1-based line number, line text)`.
pub type Hit = (String, usize, String);

struct SourceFile {
    relative: String,
    content: String,
}

impl SourceFile {
    fn is_mod_rs(&self) -> bool {
        self.relative.ends_with("/mod.rs")
    }

    /// Numbered lines up to the first `#[cfg(test)]`, which in this crate
    /// always opens a test module that runs to the end of the file.
    fn production_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content
            .lines()
            .enumerate()
            .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
            .map(|(idx, line)| (idx + 1, line))
    }

    fn hit(&self, line_no: usize, line: &str) -> Hit {
        (self.relative.clone(), line_no, line.to_string())
    }
}

fn sources(relative_dir: &str) -> Vec<SourceFile> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let mut paths = Vec::new();
    walk(&root.join(relative_dir), &mut paths);
    paths.sort();

    paths
        .into_iter()
        .map(|path| SourceFile {
            relative: path
                .strip_prefix(&root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/"),
            content: fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display())),
        })
        .collect()
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Production lines under `relative_dir` mentioning any of `patterns`.
pub fn find_non_test_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    let mut hits = Vec::new();
    for file in sources(relative_dir) {
        for (line_no, line) in file.production_lines() {
            if patterns.iter().any(|p| line.contains(p)) {
                hits.push(file.hit(line_no, line));
            }
        }
    }
    hits
}

/// Lines in `mod.rs` files that are not comments, attributes, module
/// declarations or (possibly multi-line) `pub use` re-exports.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    let mut violations = Vec::new();
    for file in sources(relative_dir).into_iter().filter(SourceFile::is_mod_rs) {
        let mut open_use = false;
        for (line_no, raw) in file.content.lines().enumerate() {
            let line = raw.trim();
            if open_use || line.starts_with("pub use ") {
                open_use = !line.ends_with(';');
                continue;
            }
            let allowed = line.is_empty()
                || line.starts_with("//")
                || line.starts_with("#[")
                || line.starts_with("pub mod ")
                || line.starts_with("mod ");
            if !allowed {
                violations.push(file.hit(line_no + 1, raw));
            }
        }
    }
    violations
}

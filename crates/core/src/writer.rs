//! Output directory lifecycle.
//!
//! Every run is a full rebuild: the output root is removed and recreated,
//! then every file is written unconditionally. A file that cannot be written
//! becomes a `WriteFailed` diagnostic and the remaining files are still
//! attempted.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::GenerateError;

/// Writes generated files below one root directory.
#[derive(Debug)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Remove `root` recursively if it exists, then create it.
    pub fn prepare(root: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        let root = root.into();
        recreate(&root)?;
        Ok(Self { root })
    }

    /// The output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Same wipe-and-create discipline for a subdirectory of the root.
    pub fn reset_dir(&self, sub: &str) -> Result<PathBuf, GenerateError> {
        let dir = self.root.join(sub);
        recreate(&dir)?;
        Ok(dir)
    }

    /// Write `contents` to `relative` (below the root), overwriting.
    ///
    /// Returns whether the file was written; failures are recorded in
    /// `diagnostics`. Paths that are absolute or contain `..` are refused.
    pub fn write(&self, relative: &Path, contents: &str, diagnostics: &mut Diagnostics) -> bool {
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            diagnostics.error(
                DiagnosticKind::WriteFailed,
                relative.display().to_string(),
                "path leaves the output directory",
            );
            return false;
        }

        let path = self.root.join(relative);

        let result = match path.parent() {
            Some(parent) if !parent.exists() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
        .and_then(|()| fs::write(&path, contents));

        match result {
            Ok(()) => {
                debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
                true
            }
            Err(e) => {
                diagnostics.error(
                    DiagnosticKind::WriteFailed,
                    relative.display().to_string(),
                    e.to_string(),
                );
                false
            }
        }
    }
}

fn recreate(dir: &Path) -> Result<(), GenerateError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| GenerateError::io("failed to remove", dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| GenerateError::io("failed to create", dir, e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_wipes_previous_output() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("client");
        fs::create_dir_all(root.join("services")).unwrap();
        fs::write(root.join("services/Stale.ts"), "stale").unwrap();

        let writer = OutputWriter::prepare(&root).unwrap();
        assert!(writer.root().exists());
        assert!(!root.join("services").exists());
    }

    #[test]
    fn test_reset_dir_and_write() {
        let temp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::prepare(temp.path().join("out")).unwrap();
        let schemas = writer.reset_dir("schemas").unwrap();
        fs::write(schemas.join("Old.ts"), "old").unwrap();
        writer.reset_dir("schemas").unwrap();
        assert!(!schemas.join("Old.ts").exists());

        let mut diagnostics = Diagnostics::new();
        assert!(writer.write(Path::new("schemas/Item.ts"), "export type Item = 'a'\n", &mut diagnostics));
        assert!(writer.write(Path::new("nested/dir/file.ts"), "x", &mut diagnostics));
        assert!(diagnostics.is_empty());
        assert_eq!(
            fs::read_to_string(schemas.join("Item.ts")).unwrap(),
            "export type Item = 'a'\n"
        );
    }

    #[test]
    fn test_write_failure_is_a_diagnostic() {
        let temp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::prepare(temp.path().join("out")).unwrap();
        // A directory where the file should go makes the write fail
        fs::create_dir_all(writer.root().join("defaults.ts")).unwrap();

        let mut diagnostics = Diagnostics::new();
        assert!(!writer.write(Path::new("defaults.ts"), "x", &mut diagnostics));
        assert!(writer.write(Path::new("other.ts"), "y", &mut diagnostics));

        assert!(diagnostics.has_errors());
        let failed: Vec<_> = diagnostics.of_kind(DiagnosticKind::WriteFailed).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].subject, "defaults.ts");
    }

    #[test]
    fn test_refuses_paths_outside_root() {
        let temp = tempfile::tempdir().unwrap();
        let writer = OutputWriter::prepare(temp.path().join("client")).unwrap();

        let mut diagnostics = Diagnostics::new();
        assert!(!writer.write(Path::new("schemas/../../escaped.ts"), "x", &mut diagnostics));
        assert!(!writer.write(&temp.path().join("absolute.ts"), "x", &mut diagnostics));

        assert!(!temp.path().join("escaped.ts").exists());
        assert!(!temp.path().join("absolute.ts").exists());
        assert_eq!(diagnostics.of_kind(DiagnosticKind::WriteFailed).count(), 2);
    }
}

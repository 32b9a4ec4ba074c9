//! Directory sink.
//!
//! ```text
//! <out_dir>/
//! ├─ LOCK                # Advisory lock held for the run
//! ├─ 0_a.xhtml           # One unit per alphabet letter
//! ├─ ...
//! ├─ abbreviations.xhtml
//! ├─ titlepage.xhtml
//! └─ content.opf
//! ```
//!
//! The LOCK file ensures only one export writes to a directory at a time.
//! Clearing removes only files named like export units; anything else in
//! the directory is left alone.

use super::OutputSink;
use crate::error::{ExportError, ExportResult};
use crate::export::{ABBREVIATIONS_UNIT, CONTENT_OPF_UNIT, TITLE_PAGE_UNIT};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const LOCK_FILE: &str = "LOCK";

/// Returns true if `name` is a unit an export writes: a letter unit
/// (`{index}_{ascii}.xhtml`) or one of the fixed pages.
fn is_export_unit(name: &str) -> bool {
    if [ABBREVIATIONS_UNIT, TITLE_PAGE_UNIT, CONTENT_OPF_UNIT].contains(&name) {
        return true;
    }
    name.strip_suffix(".xhtml")
        .and_then(|stem| stem.split_once('_'))
        .is_some_and(|(index, letter)| {
            !index.is_empty()
                && index.bytes().all(|b| b.is_ascii_digit())
                && !letter.is_empty()
                && letter.bytes().all(|b| b.is_ascii_lowercase())
        })
}

/// A sink writing each unit to a file in one directory.
///
/// Units are written to a temporary file in the same directory and renamed
/// into place, so a reader never sees a partial unit.
#[derive(Debug)]
pub struct DirSink {
    path: PathBuf,
    /// Held for exclusive access.
    _lock_file: File,
    written: usize,
}

impl DirSink {
    /// Opens `path` for writing, creating it if needed, and takes its lock.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path exists and is not a directory
    /// - Another export holds the lock (returns `OutputLocked`)
    /// - I/O errors occur
    pub fn open(path: &Path) -> ExportResult<Self> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        if !path.is_dir() {
            return Err(ExportError::invalid_config(format!(
                "output path is not a directory: {}",
                path.display()
            )));
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.join(LOCK_FILE))?;
        if lock_file.try_lock_exclusive().is_err() {
            return Err(ExportError::OutputLocked {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: lock_file,
            written: 0,
        })
    }

    /// Returns the output directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of units written since the last clear.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    fn unit_path(&self, name: &str) -> ExportResult<PathBuf> {
        let plain = Path::new(name)
            .file_name()
            .is_some_and(|file| file == name);
        if !plain || name == LOCK_FILE {
            return Err(ExportError::invalid_config(format!(
                "unit name is not a plain file name: '{name}'"
            )));
        }
        Ok(self.path.join(name))
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> ExportResult<()> {
        File::open(&self.path)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> ExportResult<()> {
        Ok(())
    }
}

impl OutputSink for DirSink {
    fn clear(&mut self) -> ExportResult<()> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let owned = entry.file_name().to_str().is_some_and(is_export_unit);
            if owned {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        self.written = 0;
        debug!(path = %self.path.display(), removed, "cleared output directory");
        Ok(())
    }

    fn write_unit(&mut self, name: &str, text: &str) -> ExportResult<()> {
        let target = self.unit_path(name)?;

        let mut temp = NamedTempFile::new_in(&self.path)?;
        temp.write_all(text.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| e.error)?;

        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        self.sync_directory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("epub");
        let sink = DirSink::open(&out).unwrap();
        assert!(out.is_dir());
        assert!(out.join(LOCK_FILE).exists());
        assert_eq!(sink.path(), out);
    }

    #[test]
    fn second_sink_is_locked_out() {
        let temp = tempdir().unwrap();
        let _first = DirSink::open(temp.path()).unwrap();
        let second = DirSink::open(temp.path());
        assert!(matches!(second, Err(ExportError::OutputLocked { .. })));
    }

    #[test]
    fn lock_released_on_drop() {
        let temp = tempdir().unwrap();
        {
            let _sink = DirSink::open(temp.path()).unwrap();
        }
        assert!(DirSink::open(temp.path()).is_ok());
    }

    #[test]
    fn clear_removes_only_export_units() {
        let temp = tempdir().unwrap();
        for unit in ["0_a.xhtml", "40_m.xhtml", "abbreviations.xhtml", "content.opf"] {
            fs::write(temp.path().join(unit), "old").unwrap();
        }
        fs::write(temp.path().join("notes.txt"), "keep").unwrap();
        fs::write(temp.path().join("cover.xhtml"), "keep").unwrap();
        fs::create_dir(temp.path().join("rows")).unwrap();
        fs::write(temp.path().join("rows").join("headwords.json"), "[]").unwrap();
        fs::create_dir(temp.path().join("1_a.xhtml")).unwrap();

        let mut sink = DirSink::open(temp.path()).unwrap();
        sink.clear().unwrap();

        let mut names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["1_a.xhtml", "LOCK", "cover.xhtml", "notes.txt", "rows"]
        );
        assert!(temp.path().join("rows").join("headwords.json").is_file());
    }

    #[test]
    fn export_unit_names() {
        assert!(is_export_unit("0_a.xhtml"));
        assert!(is_export_unit("19_th.xhtml"));
        assert!(is_export_unit("titlepage.xhtml"));
        assert!(!is_export_unit("_a.xhtml"));
        assert!(!is_export_unit("0_.xhtml"));
        assert!(!is_export_unit("0_A.xhtml"));
        assert!(!is_export_unit("0_a.html"));
        assert!(!is_export_unit("headwords.json"));
        assert!(!is_export_unit(LOCK_FILE));
    }

    #[test]
    fn units_are_written_whole() {
        let temp = tempdir().unwrap();
        let mut sink = DirSink::open(temp.path()).unwrap();
        sink.write_unit("1_a.xhtml", "first").unwrap();
        sink.write_unit("1_a.xhtml", "second").unwrap();
        sink.finish().unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("1_a.xhtml")).unwrap(),
            "second"
        );
        assert_eq!(sink.written(), 2);
    }

    #[test]
    fn nested_names_are_rejected() {
        let temp = tempdir().unwrap();
        let mut sink = DirSink::open(temp.path()).unwrap();
        assert!(sink.write_unit("../escape.xhtml", "x").is_err());
        assert!(sink.write_unit("LOCK", "x").is_err());
    }
}

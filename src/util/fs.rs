//! Filesystem utilities
//!
//! Recursive delete and hard-link copy of directory trees. Per-entry
//! failures are logged and counted so one bad file does not abort the walk.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Result of a recursive delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteStats {
    pub files_removed: usize,
    pub dirs_removed: usize,
}

/// Result of a recursive copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub dirs_created: usize,
    pub files_linked: usize,
    pub failures: usize,
}

/// Recursively delete a directory.
///
/// Symlinks are removed, never followed. A missing directory is a no-op.
/// Entries that cannot be removed are logged and skipped; the error
/// returned for the final `rmdir` then carries how many were left behind.
pub fn delete_folder(dir: &Path) -> Result<DeleteStats> {
    let mut stats = DeleteStats::default();

    let metadata = match fs::symlink_metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(stats),
        Err(e) => return Err(e).context(format!("Failed to stat {:?}", dir)),
    };

    if !metadata.is_dir() {
        bail!("Not a directory: {:?}", dir);
    }

    let mut failures = 0;
    if let Err(e) = delete_tree(dir, &mut stats, &mut failures) {
        if failures > 0 {
            return Err(e).context(format!(
                "{} entries under {:?} could not be removed",
                failures, dir
            ));
        }
        return Err(e);
    }

    Ok(stats)
}

fn delete_tree(dir: &Path, stats: &mut DeleteStats, failures: &mut usize) -> Result<()> {
    for entry in fs::read_dir(dir).context(format!("Failed to read directory {:?}", dir))? {
        let entry = entry?;
        let path = entry.path();

        // DirEntry::file_type does not follow symlinks
        if entry.file_type()?.is_dir() {
            if let Err(e) = delete_tree(&path, stats, failures) {
                tracing::error!("{:#}", e);
                *failures += 1;
            }
        } else {
            match fs::remove_file(&path) {
                Ok(()) => stats.files_removed += 1,
                Err(e) => {
                    tracing::error!("Failed to delete {:?}: {}", path, e);
                    *failures += 1;
                }
            }
        }
    }

    fs::remove_dir(dir).context(format!("Failed to remove directory {:?}", dir))?;
    stats.dirs_removed += 1;
    Ok(())
}

/// Recursively copy `src` to `dest`, hard-linking files.
///
/// Directories are followed through symlinks. A destination directory that
/// already exists is reused; other mkdir and link failures are logged and
/// counted.
pub fn copy_folder(src: &Path, dest: &Path) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    copy_tree(src, dest, &mut stats)?;
    Ok(stats)
}

fn copy_tree(src: &Path, dest: &Path, stats: &mut CopyStats) -> Result<()> {
    if src.is_dir() {
        match fs::create_dir(dest) {
            Ok(()) => stats.dirs_created += 1,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("Reusing existing directory {:?}", dest)
            }
            Err(e) => {
                tracing::warn!("Failed to create {:?}: {}", dest, e);
                stats.failures += 1;
            }
        }

        for entry in fs::read_dir(src).context(format!("Failed to read directory {:?}", src))? {
            let entry = entry?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()), stats)?;
        }
    } else {
        match fs::hard_link(src, dest) {
            Ok(()) => stats.files_linked += 1,
            Err(e) => {
                tracing::error!("Failed to link {:?} -> {:?}: {}", src, dest, e);
                stats.failures += 1;
            }
        }
    }

    Ok(())
}

/// Check whether a directory contains a Dockerfile
pub fn has_dockerfile(dir: &Path) -> bool {
    dir.join("Dockerfile").exists()
}

//! Static asset copying.
//!
//! Mirrors the static directory into the output directory, skipping files
//! whose contents already match.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of copying a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    New,
    Updated,
    Unchanged,
}

/// Counts from one static copy pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub new: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl CopyReport {
    fn record(&mut self, status: FileStatus) {
        match status {
            FileStatus::New => self.new += 1,
            FileStatus::Updated => self.updated += 1,
            FileStatus::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.updated + self.unchanged
    }
}

/// Copy every file under `src` to the same relative path under `dst`.
///
/// A missing `src` copies nothing.
pub fn copy_static(src: &Path, dst: &Path) -> Result<CopyReport> {
    let mut report = CopyReport::default();

    for rel in list_files_recursive(src)? {
        let from = src.join(&rel);
        let to = dst.join(&rel);
        let status = copy_single_file(&from, &to)?;
        log::debug!("static {} -> {} ({:?})", from.display(), to.display(), status);
        report.record(status);
    }

    Ok(report)
}

/// Copy a single file unless the destination already has identical contents.
fn copy_single_file(src: &Path, dst: &Path) -> Result<FileStatus> {
    let status = if !dst.exists() {
        FileStatus::New
    } else if file_hash(src)? == file_hash(dst)? {
        return Ok(FileStatus::Unchanged);
    } else {
        FileStatus::Updated
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} -> {}", src.display(), dst.display()))?;

    Ok(status)
}

/// Compute SHA-256 hash of file contents.
fn file_hash(path: &Path) -> Result<String> {
    let content = fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Recursively list all files under a directory, returning relative paths.
pub fn list_files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }

    Ok(files)
}

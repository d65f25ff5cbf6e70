//! Candidate discovery.
//!
//! Walks a directory tree and returns every regular file the filter admits.
//! The walk keeps an explicit work-list of directories instead of recursing,
//! so pathological tree depth cannot overflow the stack. Entries that fail
//! to stat or list (permissions, vanished files, broken links) are skipped
//! without aborting the walk.

use std::path::{Path, PathBuf};

use crate::filter::CandidateFilter;

/// Collect all probe candidates under `root`.
///
/// Symlinks are not followed. The returned order is whatever the filesystem
/// yields; callers that care shuffle it themselves.
pub fn collect_candidates(root: &Path, filter: &CandidateFilter) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries {
            let Ok(entry) = entry else { continue };
            // DirEntry::file_type and DirEntry::metadata do not traverse
            // symlinks, so link entries fall through both branches.
            let Ok(file_type) = entry.file_type() else { continue };

            if file_type.is_dir() {
                pending.push(entry.path());
            } else if file_type.is_file() {
                let Ok(metadata) = entry.metadata() else { continue };
                let path = entry.path();
                if filter.admits(&path, metadata.len()) {
                    candidates.push(path);
                }
            }
        }
    }

    candidates
}

use std::path::Path;

#[derive(Debug, Clone)]
pub struct CandidateFilter {
    /// Maximum file size in bytes. Default: 1 MiB.
    pub max_file_size: u64,

    /// Substrings that disqualify a path. Default: "compress" (previously
    /// generated artifacts) and ".lnk" (shortcut files).
    pub exclude_markers: Vec<String>,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1 MiB
            exclude_markers: vec!["compress".to_string(), ".lnk".to_string()],
        }
    }
}

impl CandidateFilter {
    /// Whether a file of the given size at the given path is eligible for
    /// probing. Marker matching is substring matching against the full
    /// path rendered as (lossy) UTF-8.
    pub fn admits(&self, path: &Path, len: u64) -> bool {
        if len > self.max_file_size {
            return false;
        }
        let rendered = path.to_string_lossy();
        !self
            .exclude_markers
            .iter()
            .any(|marker| rendered.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn admits_small_plain_file() {
        let filter = CandidateFilter::default();
        assert!(filter.admits(&PathBuf::from("/corpus/readme.txt"), 512));
    }

    #[test]
    fn size_threshold_is_inclusive() {
        let filter = CandidateFilter::default();
        let path = PathBuf::from("/corpus/data.bin");
        assert!(filter.admits(&path, 1024 * 1024));
        assert!(!filter.admits(&path, 1024 * 1024 + 1));
    }

    #[test]
    fn markers_match_anywhere_in_path() {
        let filter = CandidateFilter::default();
        assert!(!filter.admits(&PathBuf::from("/corpus/out.compressed"), 10));
        assert!(!filter.admits(&PathBuf::from("/corpus/compressed/a.txt"), 10));
        assert!(!filter.admits(&PathBuf::from("/corpus/shortcut.lnk"), 10));
    }

    #[test]
    fn custom_markers_replace_defaults() {
        let filter = CandidateFilter {
            exclude_markers: vec![".bak".to_string()],
            ..Default::default()
        };
        assert!(!filter.admits(&PathBuf::from("/corpus/old.bak"), 10));
        assert!(filter.admits(&PathBuf::from("/corpus/out.compressed"), 10));
    }

    #[test]
    fn empty_marker_list_admits_everything_small() {
        let filter = CandidateFilter {
            exclude_markers: Vec::new(),
            ..Default::default()
        };
        assert!(filter.admits(&PathBuf::from("/corpus/out.compressed"), 10));
    }
}

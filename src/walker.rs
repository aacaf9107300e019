use crate::config::AppConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Candidate paths under the scan directory, in file-name order.
///
/// Directories never come out of the walk; unreadable entries are logged and skipped.
pub fn candidate_paths(config: &AppConfig) -> impl Iterator<Item = PathBuf> {
    log::info!("Starting file discovery in {}", config.scan_directory);
    log::debug!("Configured extension filter: {:?}", config.extension);

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let extension = config.extension.to_lowercase();

    WalkDir::new(&config.scan_directory)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Error accessing {:?}: {} (skipping)", e.path(), e);
                None
            }
        })
        .filter_map(move |entry| {
            if entry.file_type().is_dir() {
                log::trace!("Skipping directory entry: {:?}", entry.path());
                return None;
            }
            if !matches_extension(entry.path(), &extension) {
                log::trace!("Skipping file due to extension filter: {:?}", entry.path());
                return None;
            }
            log::trace!("Discovered file: {:?}", entry.path());
            Some(entry.into_path())
        })
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    extension.is_empty() || path.to_string_lossy().to_lowercase().ends_with(extension)
}


#[cfg(test)]
mod tests {
    use super::test_support::config_for;
    use super::*;
    use std::fs;

    fn names(paths: Vec<PathBuf>) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    fn layout() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.JPG"), b"b").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.jpg"), b"c").unwrap();
        dir
    }

    #[test]
    fn test_top_level_only_by_default() {
        let dir = layout();
        let paths: Vec<PathBuf> = candidate_paths(&config_for(dir.path())).collect();
        assert_eq!(names(paths), vec!["a.txt", "b.JPG"]);
    }

    #[test]
    fn test_recursive_walk() {
        let dir = layout();
        let mut config = config_for(dir.path());
        config.recursive = true;
        let paths: Vec<PathBuf> = candidate_paths(&config).collect();
        assert_eq!(names(paths), vec!["a.txt", "b.JPG", "c.jpg"]);
    }

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        let dir = layout();
        let mut config = config_for(dir.path());
        config.recursive = true;
        config.extension = ".jpg".to_string();
        let paths: Vec<PathBuf> = candidate_paths(&config).collect();
        assert_eq!(names(paths), vec!["b.JPG", "c.jpg"]);
    }
}

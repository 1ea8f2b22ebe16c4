//! Collecting the input files for a batch run

use crate::error::{ExamAnalyzerError, Result};
use crate::input::file_detector::FileType;
use log::debug;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Expand files and directories into the ordered list of documents to
/// process.
///
/// Directories contribute every supported document inside them (only the
/// top level unless `recursive`). Explicit file paths are kept even when they
/// do not exist, so the batch can report them as missing.
pub fn collect_inputs(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|p| FileType::from_path(p).is_document())
                .collect();
            found.sort();
            debug!("Found {} documents in {}", found.len(), path.display());
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }

    if inputs.is_empty() {
        return Err(ExamAnalyzerError::NothingToProcess(format!(
            "no supported documents found in {}",
            paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directory_scan_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b_paper.txt"), "b").unwrap();
        fs::write(dir.path().join("a_paper.pdf"), "a").unwrap();
        fs::write(dir.path().join("notes.xyz"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c_paper.md"), "c").unwrap();

        let flat = collect_inputs(&[dir.path().to_path_buf()], false).unwrap();
        let names: Vec<String> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_paper.pdf", "b_paper.txt"]);

        let deep = collect_inputs(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_empty_directory_is_nothing_to_process() {
        let dir = TempDir::new().unwrap();
        let err = collect_inputs(&[dir.path().to_path_buf()], false).unwrap_err();
        assert!(matches!(err, ExamAnalyzerError::NothingToProcess(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_kept() {
        let inputs = collect_inputs(&[PathBuf::from("does/not/exist.pdf")], false).unwrap();
        assert_eq!(inputs, vec![PathBuf::from("does/not/exist.pdf")]);
    }
}

//! Shared helpers for reading RON data files.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;

/// Read and deserialize a single RON file.
pub fn read_ron_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&contents, &display)
}

/// Deserialize RON text, tagging errors with the given source name.
pub fn parse_ron<T: DeserializeOwned>(contents: &str, source: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: source.to_string(),
        details: e.to_string(),
    })
}

/// List all `.ron` files in a directory, sorted by file name.
pub fn ron_files_in(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, DataLoadError> {
    let dir = dir.as_ref();
    let display = dir.display().to_string();

    if !dir.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: display,
        details: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();
    Ok(files)
}

/// File stem of a data file, used as its registry key.
pub fn registry_key(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn parses_ron_text() {
        let sample: Sample = parse_ron(r#"(name: "slime", value: 3)"#, "inline").unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "slime".to_string(),
                value: 3
            }
        );
    }

    #[test]
    fn parse_errors_carry_source_name() {
        let err = parse_ron::<Sample>("(name: 3)", "broken.ron").unwrap_err();
        match err {
            DataLoadError::ParseError { path, .. } => assert_eq!(path, "broken.ron"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_ron_file::<Sample>("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn registry_key_is_file_stem() {
        assert_eq!(registry_key(Path::new("assets/data/enemies/slime.ron")), "slime");
    }
}

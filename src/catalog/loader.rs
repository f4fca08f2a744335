use std::path::Path;

use tracing::{info, warn};

use super::movie::Movie;
use crate::error::Result;

/// Decode a catalog from a JSON array of movie objects.
pub fn parse_movies(json: &str) -> Result<Vec<Movie>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a catalog file.
pub fn read_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = std::fs::read_to_string(path)?;
    parse_movies(&content)
}

/// Load a catalog, treating a missing or malformed file as an empty catalog.
///
/// Returns the movies plus a warning suitable for the status bar when the
/// file could not be used.
pub fn load_movies(path: &Path) -> (Vec<Movie>, Option<String>) {
    match read_movies(path) {
        Ok(movies) => {
            info!(path = %path.display(), count = movies.len(), "catalog loaded");
            (movies, None)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog unavailable, starting empty");
            (
                Vec::new(),
                Some(format!("⚠ Could not load {}: {}", path.display(), e)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::SAMPLE_JSON;
    use crate::error::AppError;

    #[test]
    fn parse_sample_catalog() {
        let movies = parse_movies(SAMPLE_JSON).unwrap();
        assert_eq!(movies.len(), 19);
        assert_eq!(movies[0].title, "Avatar");
        assert_eq!(movies[0].ratings.len(), 3);
    }

    #[test]
    fn parse_empty_array() {
        assert!(parse_movies("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_malformed_json_is_an_error() {
        let err = parse_movies("[{ \"Title\": ").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, SAMPLE_JSON).unwrap();
        assert_eq!(read_movies(&path).unwrap().len(), 19);
    }

    #[test]
    fn missing_file_loads_empty_with_warning() {
        let (movies, warning) = load_movies(Path::new("/nonexistent/movies.json"));
        assert!(movies.is_empty());
        assert!(warning.unwrap().contains("/nonexistent/movies.json"));
    }

    #[test]
    fn malformed_file_loads_empty_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let (movies, warning) = load_movies(&path);
        assert!(movies.is_empty());
        assert!(warning.is_some());
    }

    #[test]
    fn valid_file_has_no_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, SAMPLE_JSON).unwrap();
        let (movies, warning) = load_movies(&path);
        assert_eq!(movies.len(), 19);
        assert!(warning.is_none());
    }
}

use std::path::PathBuf;

use tracing::debug;

/// Resolves a movie's poster reference to image bytes.
///
/// Called by the host for the movie it is displaying, never by the catalog.
/// Failures surface as `None`.
pub trait PosterSource {
    fn resolve(&self, poster: &str) -> Option<Vec<u8>>;
}

/// A source with no posters at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPosters;

impl PosterSource for NoPosters {
    fn resolve(&self, _poster: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Posters cached as files in a local directory.
///
/// A reference such as `https://host/path/avatar.jpg` is looked up as
/// `<root>/avatar.jpg`.
#[derive(Debug, Clone)]
pub struct DirectoryPosters {
    root: PathBuf,
}

impl DirectoryPosters {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Local path for a poster reference, if it names a file.
    pub fn path_for(&self, poster: &str) -> Option<PathBuf> {
        let name = poster
            .rsplit(['/', '\\'])
            .next()
            .map(|n| n.split(['?', '#']).next().unwrap_or(n))
            .filter(|n| !n.is_empty() && *n != "." && *n != "..")?;
        Some(self.root.join(name))
    }
}

impl PosterSource for DirectoryPosters {
    fn resolve(&self, poster: &str) -> Option<Vec<u8>> {
        let path = self.path_for(poster)?;
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "poster not available");
                None
            }
        }
    }
}

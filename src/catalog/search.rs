use super::movie::{Movie, MovieId};
use super::sort::{sort_ids, SortDirection};

/// Case-insensitive substring match across title, actors, directors and genres.
///
/// `query_lower` must already be lowercased. Collection members are trimmed
/// by the movie's split accessors before comparison.
pub fn matches(movie: &Movie, query_lower: &str) -> bool {
    let hit = |value: &str| value.to_lowercase().contains(query_lower);
    hit(movie.title.as_str())
        || movie.actors_list().any(hit)
        || movie.directors().any(hit)
        || movie.genres().any(hit)
}

/// Filter the full catalog by `query` and sort the hits by title.
///
/// An empty query yields no results. Every call recomputes from the full
/// movie list.
pub fn search(query: &str, movies: &[Movie], direction: SortDirection) -> Vec<MovieId> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();
    let mut results: Vec<MovieId> = movies
        .iter()
        .enumerate()
        .filter(|(_, movie)| matches(movie, &query_lower))
        .map(|(idx, _)| MovieId(idx))
        .collect();
    sort_ids(&mut results, movies, direction);
    results
}

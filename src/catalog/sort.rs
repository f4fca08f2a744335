use std::cmp::Ordering;

use super::movie::{Movie, MovieId};
use super::tree::CatalogTree;

/// Title sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a sort direction from a config or CLI string.
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    /// Get the display label for the direction.
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "A→Z",
            SortDirection::Descending => "Z→A",
        }
    }

    /// The opposite direction.
    pub fn toggle(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply the direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Compare two movies by title in `direction`.
///
/// Equal titles fall back to load order in both directions, so the result
/// never depends on the order the slice was in before sorting.
pub fn compare_titles(
    movies: &[Movie],
    direction: SortDirection,
    a: MovieId,
    b: MovieId,
) -> Ordering {
    direction
        .apply(movies[a.0].title.cmp(&movies[b.0].title))
        .then_with(|| a.cmp(&b))
}

/// Sort a list of movie ids by title.
pub fn sort_ids(ids: &mut [MovieId], movies: &[Movie], direction: SortDirection) {
    ids.sort_by(|a, b| compare_titles(movies, direction, *a, *b));
}

/// Re-sort every level of the tree in place.
///
/// Covers the "All" list, each subcategory's members and the subcategories
/// within each category. Expansion flags travel with their nodes.
pub fn sort_tree(tree: &mut CatalogTree, movies: &[Movie], direction: SortDirection) {
    sort_ids(&mut tree.all_movies, movies, direction);
    for category in tree.categories.iter_mut() {
        for sub in category.subcategories.iter_mut() {
            sort_ids(&mut sub.members, movies, direction);
        }
        category
            .subcategories
            .sort_by(|a, b| direction.apply(a.title.cmp(&b.title)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::movie;

    fn titled(titles: &[&str]) -> Vec<Movie> {
        titles.iter().map(|t| movie(t, "Drama", "D", "A")).collect()
    }

    #[test]
    fn from_str_parses_variants() {
        assert_eq!(SortDirection::from_str("desc"), SortDirection::Descending);
        assert_eq!(
            SortDirection::from_str("Descending"),
            SortDirection::Descending
        );
        assert_eq!(SortDirection::from_str("asc"), SortDirection::Ascending);
        assert_eq!(SortDirection::from_str("bogus"), SortDirection::Ascending);
    }

    #[test]
    fn toggle_flips_direction() {
        assert_eq!(
            SortDirection::Ascending.toggle(),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::Descending.toggle(),
            SortDirection::Ascending
        );
    }

    #[test]
    fn sort_ids_both_directions() {
        let movies = titled(&["b", "c", "a"]);
        let mut ids = vec![MovieId(0), MovieId(1), MovieId(2)];
        sort_ids(&mut ids, &movies, SortDirection::Ascending);
        assert_eq!(ids, vec![MovieId(2), MovieId(0), MovieId(1)]);
        sort_ids(&mut ids, &movies, SortDirection::Descending);
        assert_eq!(ids, vec![MovieId(1), MovieId(0), MovieId(2)]);
    }

    #[test]
    fn equal_titles_keep_load_order() {
        let movies = titled(&["Same", "Other", "Same"]);
        let mut ids = vec![MovieId(2), MovieId(1), MovieId(0)];
        sort_ids(&mut ids, &movies, SortDirection::Ascending);
        assert_eq!(ids, vec![MovieId(1), MovieId(0), MovieId(2)]);
        sort_ids(&mut ids, &movies, SortDirection::Descending);
        assert_eq!(ids, vec![MovieId(0), MovieId(2), MovieId(1)]);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let movies = titled(&["x", "a", "m", "a"]);
        let mut ids: Vec<MovieId> = (0..4).map(MovieId).collect();
        sort_ids(&mut ids, &movies, SortDirection::Descending);
        let once = ids.clone();
        sort_ids(&mut ids, &movies, SortDirection::Descending);
        assert_eq!(ids, once);
    }
}

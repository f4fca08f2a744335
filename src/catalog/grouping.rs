use std::collections::BTreeMap;

use super::movie::{Movie, MovieId};

/// A facet by which movies are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    Genre,
    Director,
    Actor,
    /// Degenerate dimension: every movie, no subgrouping.
    All,
}

impl Dimension {
    /// All dimensions in section order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Year,
        Dimension::Genre,
        Dimension::Director,
        Dimension::Actor,
        Dimension::All,
    ];

    /// Header title shown for the dimension's section.
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::Genre => "Genre",
            Dimension::Director => "Director",
            Dimension::Actor => "Actor",
            Dimension::All => "All Movies",
        }
    }

    /// Whether the dimension has subcategories.
    pub fn is_grouped(&self) -> bool {
        !matches!(self, Dimension::All)
    }

    /// Group keys a movie contributes to under this dimension.
    ///
    /// Year is taken as-is; the multi-value fields go through the shared
    /// split-and-trim accessors. `All` contributes no keys.
    pub fn keys<'a>(&self, movie: &'a Movie) -> Vec<&'a str> {
        match self {
            Dimension::Year if movie.year.is_empty() => Vec::new(),
            Dimension::Year => vec![movie.year.as_str()],
            Dimension::Genre => movie.genres().collect(),
            Dimension::Director => movie.directors().collect(),
            Dimension::Actor => movie.actors_list().collect(),
            Dimension::All => Vec::new(),
        }
    }
}

/// Group key → member ids, in the order members were encountered.
pub type GroupMap = BTreeMap<String, Vec<MovieId>>;

/// Groupings for every non-degenerate dimension.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    pub year: GroupMap,
    pub genre: GroupMap,
    pub director: GroupMap,
    pub actor: GroupMap,
}

impl Groups {
    /// The mapping for a dimension, or `None` for `All`.
    pub fn get(&self, dimension: Dimension) -> Option<&GroupMap> {
        match dimension {
            Dimension::Year => Some(&self.year),
            Dimension::Genre => Some(&self.genre),
            Dimension::Director => Some(&self.director),
            Dimension::Actor => Some(&self.actor),
            Dimension::All => None,
        }
    }
}

/// Build one grouping for a single dimension.
///
/// A movie that lists the same key twice is inserted twice.
pub fn group_by(movies: &[Movie], dimension: Dimension) -> GroupMap {
    let mut groups = GroupMap::new();
    for (idx, movie) in movies.iter().enumerate() {
        for key in dimension.keys(movie) {
            groups.entry(key.to_string()).or_default().push(MovieId(idx));
        }
    }
    groups
}

/// Group the catalog along every non-degenerate dimension.
pub fn group_movies(movies: &[Movie]) -> Groups {
    Groups {
        year: group_by(movies, Dimension::Year),
        genre: group_by(movies, Dimension::Genre),
        director: group_by(movies, Dimension::Director),
        actor: group_by(movies, Dimension::Actor),
    }
}

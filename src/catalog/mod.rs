//! Movie catalog: grouping, expandable tree, row projection, search and sort.
//!
//! [`Catalog`] is the single owner of all browsing state. Hosts query it
//! through mode-dispatching accessors (`section_count`, `row_count`, `row`)
//! and drain [`Change`] notifications after mutating calls to learn the
//! minimal redraw scope.

pub mod grouping;
pub mod loader;
pub mod movie;
pub mod poster;
pub mod projector;
pub mod search;
pub mod sort;
pub mod tree;

use tracing::debug;

use crate::error::{AppError, Result};

use self::grouping::group_movies;
use self::movie::{Movie, MovieId};
use self::projector::Row;
use self::sort::{sort_ids, sort_tree, SortDirection};
use self::tree::CatalogTree;

/// What the host is currently browsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Sectioned tree view.
    #[default]
    Browsing,
    /// One flat section of search hits, in result order.
    Searching { query: String, results: Vec<MovieId> },
}

/// Redraw scope emitted after a mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Section(usize),
    All,
}

/// Catalog state: movie arena, tree, mode, sort direction and cached counts.
pub struct Catalog {
    movies: Vec<Movie>,
    tree: CatalogTree,
    mode: Mode,
    direction: SortDirection,
    /// Row count per tree section, refreshed after every mutation.
    counts: Vec<usize>,
    changes: Vec<Change>,
}

impl Catalog {
    /// Build a catalog, grouping and sorting the movies in `direction`.
    pub fn new(movies: Vec<Movie>, direction: SortDirection) -> Self {
        let mut catalog = Self {
            movies: Vec::new(),
            tree: CatalogTree::default(),
            mode: Mode::Browsing,
            direction,
            counts: Vec::new(),
            changes: Vec::new(),
        };
        catalog.load(movies);
        catalog.changes.clear();
        catalog
    }

    /// A catalog with no movies.
    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self::new(Vec::new(), SortDirection::default())
    }

    /// Replace the movie list. Search is cleared and everything collapses;
    /// the sort direction is kept.
    pub fn reload(&mut self, movies: Vec<Movie>) {
        self.load(movies);
    }

    fn load(&mut self, movies: Vec<Movie>) {
        let groups = group_movies(&movies);
        self.tree = CatalogTree::build(&movies, &groups, self.direction);
        self.movies = movies;
        self.mode = Mode::Browsing;
        self.refresh_all_counts();
        self.changes.push(Change::All);
        debug!(
            movies = self.movies.len(),
            sections = self.tree.section_count(),
            "catalog built"
        );
    }

    fn refresh_all_counts(&mut self) {
        self.counts = (0..self.tree.section_count())
            .map(|s| projector::section_len(&self.tree, s).unwrap_or(1))
            .collect();
    }

    fn refresh_count(&mut self, section: usize) -> Result<()> {
        let len = projector::section_len(&self.tree, section)?;
        if let Some(slot) = self.counts.get_mut(section) {
            *slot = len;
        }
        Ok(())
    }

    // ── Entities ────────────────────────────────────────────────────────────

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id.0)
    }

    #[allow(dead_code)]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn tree(&self) -> &CatalogTree {
        &self.tree
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    // ── Mode-dispatching row access ─────────────────────────────────────────

    /// Number of sections: one while searching, one per dimension otherwise.
    pub fn section_count(&self) -> usize {
        match self.mode {
            Mode::Browsing => self.tree.section_count(),
            Mode::Searching { .. } => 1,
        }
    }

    pub fn row_count(&self, section: usize) -> Result<usize> {
        match &self.mode {
            Mode::Browsing => self.counts.get(section).copied().ok_or(AppError::OutOfRange {
                section,
                index: 0,
                len: self.counts.len(),
            }),
            Mode::Searching { results, .. } if section == 0 => Ok(results.len()),
            Mode::Searching { .. } => Err(AppError::OutOfRange {
                section,
                index: 0,
                len: 1,
            }),
        }
    }

    pub fn row(&self, section: usize, index: usize) -> Result<Row> {
        match &self.mode {
            Mode::Browsing => projector::resolve(&self.tree, section, index),
            Mode::Searching { .. } if section == 0 => self.search_row(index),
            Mode::Searching { .. } => Err(AppError::OutOfRange {
                section,
                index,
                len: 1,
            }),
        }
    }

    /// Every row of a section. Prefer `row` for on-demand access.
    #[allow(dead_code)]
    pub fn section_rows(&self, section: usize) -> Result<Vec<Row>> {
        match &self.mode {
            Mode::Browsing => projector::project_section(&self.tree, section),
            Mode::Searching { results, .. } if section == 0 => {
                Ok(results.iter().map(|&id| Row::Movie { id }).collect())
            }
            Mode::Searching { .. } => Err(AppError::OutOfRange {
                section,
                index: 0,
                len: 1,
            }),
        }
    }

    /// Flip the header at `(section, index)`.
    ///
    /// Returns `false` for movie rows. Search rows are all movie rows.
    pub fn toggle(&mut self, section: usize, index: usize) -> Result<bool> {
        if let Mode::Searching { .. } = self.mode {
            self.row(section, index)?;
            return Ok(false);
        }
        let changed = projector::toggle(&mut self.tree, section, index)?;
        if changed {
            self.refresh_count(section)?;
            self.changes.push(Change::Section(section));
            debug!(section, index, rows = self.counts[section], "toggled");
        }
        Ok(changed)
    }

    // ── Search ──────────────────────────────────────────────────────────────

    /// Run a search over the full catalog. An empty query returns to browsing.
    pub fn set_query(&mut self, query: &str) {
        let was_searching = self.is_search_active();
        if query.is_empty() {
            self.mode = Mode::Browsing;
        } else {
            let results = search::search(query, &self.movies, self.direction);
            debug!(query, hits = results.len(), "search");
            self.mode = Mode::Searching {
                query: query.to_string(),
                results,
            };
        }
        if was_searching || self.is_search_active() {
            self.changes.push(Change::All);
        }
    }

    pub fn is_search_active(&self) -> bool {
        matches!(self.mode, Mode::Searching { .. })
    }

    /// Current query, empty while browsing.
    pub fn query(&self) -> &str {
        match &self.mode {
            Mode::Searching { query, .. } => query,
            Mode::Browsing => "",
        }
    }

    pub fn search_row_count(&self) -> usize {
        match &self.mode {
            Mode::Searching { results, .. } => results.len(),
            Mode::Browsing => 0,
        }
    }

    pub fn search_row(&self, index: usize) -> Result<Row> {
        let results: &[MovieId] = match &self.mode {
            Mode::Searching { results, .. } => results,
            Mode::Browsing => &[],
        };
        results
            .get(index)
            .map(|&id| Row::Movie { id })
            .ok_or(AppError::OutOfRange {
                section: 0,
                index,
                len: results.len(),
            })
    }

    // ── Sort ────────────────────────────────────────────────────────────────

    /// Re-sort every level in `direction`. No-op if unchanged.
    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        if direction == self.direction {
            return;
        }
        self.direction = direction;
        sort_tree(&mut self.tree, &self.movies, direction);
        if let Mode::Searching { results, .. } = &mut self.mode {
            sort_ids(results, &self.movies, direction);
        }
        self.refresh_all_counts();
        self.changes.push(Change::All);
        debug!(direction = direction.label(), "sorted");
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    // ── Change notifications ────────────────────────────────────────────────

    /// Drain pending change notifications, oldest first.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_movies;
    use super::*;

    const GENRE: usize = 1;
    const ALL: usize = 4;

    fn sample() -> Catalog {
        Catalog::new(sample_movies(), SortDirection::Ascending)
    }

    fn titles(catalog: &Catalog, ids: &[MovieId]) -> Vec<String> {
        ids.iter()
            .map(|&id| catalog.movie(id).unwrap().title.clone())
            .collect()
    }

    fn is_monotonic(titles: &[String], direction: SortDirection) -> bool {
        titles.windows(2).all(|w| match direction {
            SortDirection::Ascending => w[0] <= w[1],
            SortDirection::Descending => w[0] >= w[1],
        })
    }

    #[test]
    fn load_builds_five_collapsed_sections() {
        let catalog = sample();
        assert_eq!(catalog.len(), 19);
        assert_eq!(catalog.section_count(), 5);
        for section in 0..5 {
            assert_eq!(catalog.row_count(section).unwrap(), 1);
        }
        assert!(!catalog.is_search_active());
    }

    #[test]
    fn first_row_is_a_category_header() {
        let catalog = sample();
        assert_eq!(
            catalog.row(0, 0).unwrap(),
            Row::Category {
                title: "Year".into(),
                is_expanded: false
            }
        );
    }

    #[test]
    fn expanding_all_yields_twenty_rows() {
        let mut catalog = sample();
        assert!(catalog.toggle(ALL, 0).unwrap());
        assert_eq!(catalog.row_count(ALL).unwrap(), 20);
    }

    #[test]
    fn toggling_genre_subcategory_updates_only_that_section() {
        let mut catalog = sample();
        catalog.take_changes();
        catalog.toggle(GENRE, 0).unwrap();
        catalog.toggle(GENRE, 5).unwrap(); // Crime, 3 members
        assert_eq!(catalog.row_count(GENRE).unwrap(), 1 + 1 + 3 + 13);
        assert_eq!(
            catalog.take_changes(),
            vec![Change::Section(GENRE), Change::Section(GENRE)]
        );
        for section in [0, 2, 3, 4] {
            assert_eq!(catalog.row_count(section).unwrap(), 1);
        }
    }

    #[test]
    fn toggle_movie_row_is_noop_without_change() {
        let mut catalog = sample();
        catalog.toggle(ALL, 0).unwrap();
        catalog.take_changes();
        assert!(!catalog.toggle(ALL, 1).unwrap());
        assert!(catalog.take_changes().is_empty());
    }

    #[test]
    fn toggle_out_of_range_is_an_error() {
        let mut catalog = sample();
        assert!(matches!(
            catalog.toggle(ALL, 1),
            Err(AppError::OutOfRange { .. })
        ));
        assert!(catalog.row(7, 0).is_err());
        assert!(catalog.row_count(7).is_err());
    }

    #[test]
    fn cached_counts_match_materialized_rows() {
        let mut catalog = sample();
        for section in 0..5 {
            catalog.toggle(section, 0).unwrap();
        }
        catalog.toggle(0, 3).unwrap();
        catalog.toggle(3, 1).unwrap();
        for section in 0..5 {
            let rows = catalog.section_rows(section).unwrap();
            assert_eq!(rows.len(), catalog.row_count(section).unwrap());
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(&catalog.row(section, i).unwrap(), row);
            }
        }
    }

    #[test]
    fn search_switches_to_single_flat_section() {
        let mut catalog = sample();
        catalog.set_query("america");
        assert!(catalog.is_search_active());
        assert_eq!(catalog.query(), "america");
        assert_eq!(catalog.section_count(), 1);
        assert_eq!(catalog.row_count(0).unwrap(), 2);
        assert_eq!(catalog.search_row_count(), 2);
        assert!(matches!(catalog.row(0, 0).unwrap(), Row::Movie { .. }));
        assert_eq!(catalog.row(0, 1).unwrap(), catalog.search_row(1).unwrap());
        assert!(catalog.row(1, 0).is_err());
        assert!(catalog.search_row(2).is_err());
    }

    #[test]
    fn search_finds_director_only_matches() {
        let mut catalog = sample();
        catalog.set_query("Nolan");
        let Mode::Searching { results, .. } = catalog.mode().clone() else {
            panic!("expected search mode");
        };
        assert_eq!(
            titles(&catalog, &results),
            vec!["Inception", "Interstellar", "The Dark Knight"]
        );
    }

    #[test]
    fn empty_query_clears_search() {
        let mut catalog = sample();
        catalog.set_query("nolan");
        catalog.set_query("");
        assert!(!catalog.is_search_active());
        assert_eq!(catalog.search_row_count(), 0);
        assert_eq!(catalog.section_count(), 5);

        // also when search was never active
        let mut fresh = sample();
        fresh.take_changes();
        fresh.set_query("");
        assert!(!fresh.is_search_active());
        assert!(fresh.take_changes().is_empty());
    }

    #[test]
    fn no_match_is_an_active_empty_search() {
        let mut catalog = sample();
        catalog.set_query("qqqqqq");
        assert!(catalog.is_search_active());
        assert_eq!(catalog.row_count(0).unwrap(), 0);
    }

    #[test]
    fn toggle_while_searching_changes_nothing() {
        let mut catalog = sample();
        catalog.set_query("nolan");
        let before = catalog.tree().clone();
        assert!(!catalog.toggle(0, 0).unwrap());
        assert!(catalog.toggle(0, 9).is_err());
        assert_eq!(catalog.tree(), &before);
    }

    #[test]
    fn browsing_state_survives_a_search() {
        let mut catalog = sample();
        catalog.toggle(GENRE, 0).unwrap();
        catalog.set_query("her");
        catalog.set_query("");
        assert_eq!(catalog.row_count(GENRE).unwrap(), 15);
    }

    #[test]
    fn sort_descending_orders_every_level() {
        let mut catalog = sample();
        catalog.set_sort_direction(SortDirection::Descending);
        assert_eq!(catalog.sort_direction(), SortDirection::Descending);

        let all = titles(&catalog, &catalog.tree().all_movies);
        assert!(is_monotonic(&all, SortDirection::Descending));
        for category in &catalog.tree().categories {
            let keys: Vec<String> = category
                .subcategories
                .iter()
                .map(|s| s.title.clone())
                .collect();
            assert!(is_monotonic(&keys, SortDirection::Descending));
            for sub in &category.subcategories {
                let members = titles(&catalog, &sub.members);
                assert!(is_monotonic(&members, SortDirection::Descending));
            }
        }
    }

    #[test]
    fn sort_ascending_after_descending_restores_order() {
        let mut catalog = sample();
        let original = catalog.tree().clone();
        catalog.set_sort_direction(SortDirection::Descending);
        catalog.set_sort_direction(SortDirection::Ascending);
        assert_eq!(catalog.tree(), &original);
    }

    #[test]
    fn same_direction_is_idempotent() {
        let mut catalog = sample();
        catalog.take_changes();
        catalog.set_sort_direction(SortDirection::Ascending);
        assert!(catalog.take_changes().is_empty());

        catalog.set_sort_direction(SortDirection::Descending);
        let once = catalog.tree().clone();
        catalog.set_sort_direction(SortDirection::Descending);
        assert_eq!(catalog.tree(), &once);
    }

    #[test]
    fn sort_preserves_expansion_and_recounts() {
        let mut catalog = sample();
        catalog.toggle(GENRE, 0).unwrap();
        catalog.toggle(GENRE, 5).unwrap(); // Crime
        catalog.take_changes();

        catalog.set_sort_direction(SortDirection::Descending);
        assert_eq!(catalog.take_changes(), vec![Change::All]);
        assert_eq!(catalog.row_count(GENRE).unwrap(), 18);
        let crime = catalog.tree().categories[GENRE]
            .subcategories
            .iter()
            .find(|s| s.title == "Crime")
            .unwrap();
        assert!(crime.is_expanded);
        // Western, Thriller, Sci-Fi, Romance, Mystery, Music, Horror, Fantasy, Drama, Crime
        assert_eq!(
            catalog.row(GENRE, 10).unwrap(),
            Row::Subcategory {
                title: "Crime".into(),
                is_expanded: true,
                member_count: 3
            }
        );
    }

    #[test]
    fn sort_reorders_active_search_results() {
        let mut catalog = sample();
        catalog.set_query("nolan");
        catalog.set_sort_direction(SortDirection::Descending);
        let first = catalog.search_row(0).unwrap();
        let Row::Movie { id } = first else {
            panic!("search rows are movie rows");
        };
        assert_eq!(catalog.movie(id).unwrap().title, "The Dark Knight");
    }

    #[test]
    fn search_uses_current_direction() {
        let mut catalog = Catalog::new(sample_movies(), SortDirection::Descending);
        catalog.set_query("america");
        let Row::Movie { id } = catalog.search_row(0).unwrap() else {
            panic!("search rows are movie rows");
        };
        assert_eq!(
            catalog.movie(id).unwrap().title,
            "Captain America: The First Avenger"
        );
    }

    #[test]
    fn empty_catalog_is_valid() {
        let mut catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.section_count(), 5);
        assert!(catalog.toggle(ALL, 0).unwrap());
        assert_eq!(catalog.row_count(ALL).unwrap(), 1);
        catalog.set_query("anything");
        assert_eq!(catalog.row_count(0).unwrap(), 0);
    }

    #[test]
    fn reload_resets_mode_and_keeps_direction() {
        let mut catalog = sample();
        catalog.set_sort_direction(SortDirection::Descending);
        catalog.toggle(ALL, 0).unwrap();
        catalog.set_query("her");
        catalog.take_changes();

        catalog.reload(sample_movies());
        assert!(!catalog.is_search_active());
        assert_eq!(catalog.sort_direction(), SortDirection::Descending);
        assert_eq!(catalog.row_count(ALL).unwrap(), 1);
        assert_eq!(catalog.take_changes(), vec![Change::All]);
    }
}

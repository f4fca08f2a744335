use super::grouping::{Dimension, Groups};
use super::movie::{Movie, MovieId};
use super::sort::{sort_tree, SortDirection};

/// Second-level node: one group key within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub title: String,
    pub is_expanded: bool,
    /// Never empty.
    pub members: Vec<MovieId>,
}

/// Top-level node: one per dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub dimension: Dimension,
    pub title: String,
    pub is_expanded: bool,
    /// Empty for `Dimension::All`.
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    fn new(dimension: Dimension, subcategories: Vec<Subcategory>) -> Self {
        Self {
            dimension,
            title: dimension.title().to_string(),
            is_expanded: false,
            subcategories,
        }
    }
}

/// Categories, subcategories and the sorted "All" list.
///
/// Nodes are addressed by position: `categories[section]` and
/// `categories[section].subcategories[i]`. Rows never hold references into
/// the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTree {
    pub categories: Vec<Category>,
    /// Every movie, sorted by title. Members of the "All" section.
    pub all_movies: Vec<MovieId>,
}

impl CatalogTree {
    /// Build a fully collapsed tree, one category per dimension in fixed order.
    pub fn build(movies: &[Movie], groups: &Groups, direction: SortDirection) -> Self {
        let categories = Dimension::ALL
            .iter()
            .map(|&dimension| {
                let subcategories = groups
                    .get(dimension)
                    .map(|map| {
                        map.iter()
                            .filter(|(_, members)| !members.is_empty())
                            .map(|(key, members)| Subcategory {
                                title: key.clone(),
                                is_expanded: false,
                                members: members.clone(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Category::new(dimension, subcategories)
            })
            .collect();

        let mut tree = Self {
            categories,
            all_movies: (0..movies.len()).map(MovieId).collect(),
        };
        sort_tree(&mut tree, movies, direction);
        tree
    }

    /// Number of top-level sections.
    pub fn section_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, section: usize) -> Option<&Category> {
        self.categories.get(section)
    }

    /// Members shown when a category is expanded without subgrouping.
    pub fn direct_members(&self, section: usize) -> &[MovieId] {
        match self.categories.get(section) {
            Some(c) if c.dimension == Dimension::All => &self.all_movies,
            _ => &[],
        }
    }
}

//! Tree → flat row projection and its inverse.
//!
//! A section is the row range of one top-level category:
//!
//! ```text
//! Category                 (always)
//!   Subcategory            (if category expanded, grouped dimension)
//!     Movie ...            (if subcategory expanded)
//!   Movie ...              (if category expanded, "All")
//! ```
//!
//! `section_len` and `resolve` walk subcategory headers only, so a host can
//! query rows on demand without materializing the section.

use crate::error::{AppError, Result};

use super::movie::MovieId;
use super::tree::CatalogTree;

/// One display line of the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Category {
        title: String,
        is_expanded: bool,
    },
    Subcategory {
        title: String,
        is_expanded: bool,
        member_count: usize,
    },
    Movie {
        id: MovieId,
    },
}

impl Row {
    /// Header rows can be expanded and collapsed.
    pub fn is_toggleable(&self) -> bool {
        !matches!(self, Row::Movie { .. })
    }
}

/// Materialize every row of one section.
pub fn project_section(tree: &CatalogTree, section: usize) -> Result<Vec<Row>> {
    let category = tree.category(section).ok_or(AppError::OutOfRange {
        section,
        index: 0,
        len: tree.section_count(),
    })?;

    let mut rows = vec![Row::Category {
        title: category.title.clone(),
        is_expanded: category.is_expanded,
    }];
    if !category.is_expanded {
        return Ok(rows);
    }

    if !category.dimension.is_grouped() {
        rows.extend(tree.direct_members(section).iter().map(|&id| Row::Movie { id }));
        return Ok(rows);
    }

    for sub in &category.subcategories {
        rows.push(Row::Subcategory {
            title: sub.title.clone(),
            is_expanded: sub.is_expanded,
            member_count: sub.members.len(),
        });
        if sub.is_expanded {
            rows.extend(sub.members.iter().map(|&id| Row::Movie { id }));
        }
    }
    Ok(rows)
}

/// Materialize every section, in section order.
#[allow(dead_code)]
pub fn project(tree: &CatalogTree) -> Vec<Vec<Row>> {
    (0..tree.section_count())
        .filter_map(|section| project_section(tree, section).ok())
        .collect()
}

/// Row count of one section, computed without materializing it.
pub fn section_len(tree: &CatalogTree, section: usize) -> Result<usize> {
    let category = tree.category(section).ok_or(AppError::OutOfRange {
        section,
        index: 0,
        len: tree.section_count(),
    })?;

    if !category.is_expanded {
        return Ok(1);
    }
    if !category.dimension.is_grouped() {
        return Ok(1 + tree.direct_members(section).len());
    }
    Ok(1 + category
        .subcategories
        .iter()
        .map(|sub| 1 + if sub.is_expanded { sub.members.len() } else { 0 })
        .sum::<usize>())
}

/// Where a flat index lands inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Category,
    Subcategory(usize),
    SubcategoryMember(usize, usize),
    DirectMember(usize),
}

fn locate(tree: &CatalogTree, section: usize, index: usize) -> Result<Position> {
    let len = section_len(tree, section)?;
    let out_of_range = AppError::OutOfRange {
        section,
        index,
        len,
    };
    if index >= len {
        return Err(out_of_range);
    }
    if index == 0 {
        return Ok(Position::Category);
    }

    let category = &tree.categories[section];
    if !category.dimension.is_grouped() {
        return Ok(Position::DirectMember(index - 1));
    }

    let mut offset = 1;
    for (sub_idx, sub) in category.subcategories.iter().enumerate() {
        if index == offset {
            return Ok(Position::Subcategory(sub_idx));
        }
        offset += 1;
        if sub.is_expanded {
            if index < offset + sub.members.len() {
                return Ok(Position::SubcategoryMember(sub_idx, index - offset));
            }
            offset += sub.members.len();
        }
    }
    Err(out_of_range)
}

/// The row that `project_section` would place at `index`.
pub fn resolve(tree: &CatalogTree, section: usize, index: usize) -> Result<Row> {
    let position = locate(tree, section, index)?;
    let category = &tree.categories[section];
    let row = match position {
        Position::Category => Row::Category {
            title: category.title.clone(),
            is_expanded: category.is_expanded,
        },
        Position::Subcategory(s) => {
            let sub = &category.subcategories[s];
            Row::Subcategory {
                title: sub.title.clone(),
                is_expanded: sub.is_expanded,
                member_count: sub.members.len(),
            }
        }
        Position::SubcategoryMember(s, m) => Row::Movie {
            id: category.subcategories[s].members[m],
        },
        Position::DirectMember(m) => Row::Movie {
            id: tree.direct_members(section)[m],
        },
    };
    Ok(row)
}

/// Flip the expansion flag of the header row at `index`.
///
/// Returns `false` for movie rows, which are not toggleable. Only the given
/// section is affected.
pub fn toggle(tree: &mut CatalogTree, section: usize, index: usize) -> Result<bool> {
    let position = locate(tree, section, index)?;
    let category = &mut tree.categories[section];
    match position {
        Position::Category => {
            category.is_expanded = !category.is_expanded;
            Ok(true)
        }
        Position::Subcategory(s) => {
            let sub = &mut category.subcategories[s];
            sub.is_expanded = !sub.is_expanded;
            Ok(true)
        }
        Position::SubcategoryMember(..) | Position::DirectMember(_) => Ok(false),
    }
}

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::catalog::loader::load_movies;
use crate::catalog::movie::{Movie, MovieId};
use crate::catalog::poster::{NoPosters, PosterSource};
use crate::catalog::projector::Row;
use crate::catalog::{Catalog, Change};
use crate::components::help::HelpOverlay;
use crate::theme::{self, ThemeColors};

/// Which input the keyboard is currently driving.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search bar; every keystroke re-runs the search.
    Search,
    Help,
}

/// Text input state for the search bar.
#[derive(Debug, Default)]
pub struct SearchInput {
    pub query: String,
    /// Byte offset of the cursor in `query`.
    pub cursor_position: usize,
}

/// Total rows across every section, as the host list shows them.
pub fn flat_len(catalog: &Catalog) -> usize {
    (0..catalog.section_count())
        .filter_map(|s| catalog.row_count(s).ok())
        .sum()
}

/// Map a list index onto `(section, row)`.
pub fn flat_position(catalog: &Catalog, mut index: usize) -> Option<(usize, usize)> {
    for section in 0..catalog.section_count() {
        let len = catalog.row_count(section).ok()?;
        if index < len {
            return Some((section, index));
        }
        index -= len;
    }
    None
}

/// Indentation level of a row for display.
pub fn row_depth(catalog: &Catalog, section: usize, row: &Row) -> usize {
    match row {
        Row::Category { .. } => 0,
        Row::Subcategory { .. } => 1,
        Row::Movie { .. } if catalog.is_search_active() => 0,
        Row::Movie { .. } => match catalog.tree().category(section) {
            Some(c) if !c.dimension.is_grouped() => 1,
            _ => 2,
        },
    }
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub search: SearchInput,
    /// Index into the flattened list of all sections.
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub show_detail: bool,
    pub help_scroll: usize,
    pub status_message: Option<(String, Instant)>,
    pub status_is_error: bool,
    pub theme: ThemeColors,
    /// Catalog file, re-read on reload.
    movies_path: Option<PathBuf>,
    posters: Box<dyn PosterSource>,
    /// Poster byte size per movie, `None` if unavailable.
    poster_sizes: HashMap<MovieId, Option<usize>>,
}

impl App {
    /// Create a new App over a loaded catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            should_quit: false,
            input_mode: InputMode::Normal,
            search: SearchInput::default(),
            selected_index: 0,
            scroll_offset: 0,
            show_detail: true,
            help_scroll: 0,
            status_message: None,
            status_is_error: false,
            theme: theme::dark_theme(),
            movies_path: None,
            posters: Box::new(NoPosters),
            poster_sizes: HashMap::new(),
        }
    }

    /// Use `posters` to look up poster images for the detail panel.
    pub fn with_posters(mut self, posters: Box<dyn PosterSource>) -> Self {
        self.posters = posters;
        self.poster_sizes.clear();
        self
    }

    pub fn with_movies_path(mut self, path: PathBuf) -> Self {
        self.movies_path = Some(path);
        self
    }

    pub fn with_theme(mut self, theme: ThemeColors) -> Self {
        self.theme = theme;
        self
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
        self.status_is_error = false;
    }

    /// Set a status message rendered in the error style.
    pub fn set_error_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
        self.status_is_error = true;
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Number of rows in the list.
    pub fn row_total(&self) -> usize {
        flat_len(&self.catalog)
    }

    /// `(section, row)` of the selected list entry.
    pub fn selected_position(&self) -> Option<(usize, usize)> {
        flat_position(&self.catalog, self.selected_index)
    }

    pub fn selected_row(&self) -> Option<Row> {
        let (section, row) = self.selected_position()?;
        self.catalog.row(section, row).ok()
    }

    /// The movie under the selection, if the selection is a movie row.
    pub fn selected_movie(&self) -> Option<&Movie> {
        match self.selected_row()? {
            Row::Movie { id } => self.catalog.movie(id),
            _ => None,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        let len = self.row_total();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up by one item.
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        self.selected_index = self.row_total().saturating_sub(1);
    }

    /// Move the selection by `delta` rows, clamped to the list.
    pub fn select_by(&mut self, delta: isize) {
        let last = self.row_total().saturating_sub(1);
        let target = self.selected_index.saturating_add_signed(delta);
        self.selected_index = target.min(last);
    }

    /// Update the scroll offset to ensure the selected item is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.row_total();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // ── Expansion ───────────────────────────────────────────────────────────

    /// Expand or collapse the selected header. No-op on movie rows.
    pub fn toggle_selected(&mut self) {
        let Some((section, row)) = self.selected_position() else {
            return;
        };
        match self.catalog.toggle(section, row) {
            Ok(_) => self.process_changes(),
            Err(e) => error!(error = %e, "toggle rejected"),
        }
    }

    /// Expand the selected header if it is collapsed.
    pub fn expand_selected(&mut self) {
        match self.selected_row() {
            Some(Row::Category { is_expanded, .. } | Row::Subcategory { is_expanded, .. })
                if !is_expanded =>
            {
                self.toggle_selected()
            }
            _ => {}
        }
    }

    /// Collapse the selected header, or jump to the enclosing header.
    pub fn collapse_selected(&mut self) {
        match self.selected_row() {
            Some(Row::Category { is_expanded, .. } | Row::Subcategory { is_expanded, .. })
                if is_expanded =>
            {
                self.toggle_selected()
            }
            Some(_) => self.select_parent(),
            None => {}
        }
    }

    /// Move the selection to the nearest header above with a smaller depth.
    fn select_parent(&mut self) {
        let Some((section, row)) = self.selected_position() else {
            return;
        };
        let Ok(current) = self.catalog.row(section, row) else {
            return;
        };
        let depth = row_depth(&self.catalog, section, &current);
        if depth == 0 {
            return;
        }
        for candidate in (0..row).rev() {
            let Ok(r) = self.catalog.row(section, candidate) else {
                break;
            };
            if r.is_toggleable() && row_depth(&self.catalog, section, &r) < depth {
                self.selected_index -= row - candidate;
                return;
            }
        }
    }

    // ── Search ──────────────────────────────────────────────────────────────

    /// Enter search input mode, keeping any existing query.
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search.cursor_position = self.search.query.len();
    }

    /// Leave search input mode, keeping the results on screen.
    pub fn accept_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Clear the query and return to browsing.
    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search = SearchInput::default();
        self.apply_query();
    }

    /// Insert a character at the cursor and re-run the search.
    pub fn search_input_char(&mut self, c: char) {
        self.search.query.insert(self.search.cursor_position, c);
        self.search.cursor_position += c.len_utf8();
        self.apply_query();
    }

    /// Delete the character before the cursor and re-run the search.
    pub fn search_delete_char(&mut self) {
        let pos = self.search.cursor_position;
        if let Some(prev) = self.search.query[..pos].chars().next_back() {
            self.search.cursor_position -= prev.len_utf8();
            self.search.query.remove(self.search.cursor_position);
            self.apply_query();
        }
    }

    /// Move cursor left by one character.
    pub fn search_cursor_left(&mut self) {
        let pos = self.search.cursor_position;
        if let Some(prev) = self.search.query[..pos].chars().next_back() {
            self.search.cursor_position -= prev.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn search_cursor_right(&mut self) {
        let pos = self.search.cursor_position;
        if let Some(next) = self.search.query[pos..].chars().next() {
            self.search.cursor_position += next.len_utf8();
        }
    }

    fn apply_query(&mut self) {
        self.catalog.set_query(&self.search.query);
        self.process_changes();
    }

    // ── Sort / layout ───────────────────────────────────────────────────────

    /// Flip the title sort direction.
    pub fn toggle_sort(&mut self) {
        let direction = self.catalog.sort_direction().toggle();
        self.catalog.set_sort_direction(direction);
        self.process_changes();
        self.set_status_message(format!("Sorted {}", direction.label()));
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn toggle_help(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::Help => InputMode::Normal,
            _ => InputMode::Help,
        };
        self.help_scroll = 0;
    }

    /// Scroll the help overlay, bounded by its content length.
    pub fn scroll_help(&mut self, delta: isize) {
        let max = HelpOverlay::total_lines().saturating_sub(1);
        self.help_scroll = self.help_scroll.saturating_add_signed(delta).min(max);
    }

    /// One-line description of what is on screen, for the status bar.
    pub fn summary(&self) -> String {
        if self.catalog.is_search_active() {
            let n = self.catalog.search_row_count();
            let noun = if n == 1 { "result" } else { "results" };
            format!("Search “{}” · {} {}", self.catalog.query(), n, noun)
        } else {
            let n = self.catalog.len();
            let noun = if n == 1 { "movie" } else { "movies" };
            format!("Browsing · {} {}", n, noun)
        }
    }

    /// Re-read the catalog file. Search is cleared and every header collapses.
    pub fn reload_catalog(&mut self) {
        let Some(path) = self.movies_path.clone() else {
            return;
        };
        let (movies, warning) = load_movies(&path);
        if let Some(warning) = warning {
            // Keep what is on screen rather than swapping in an empty catalog
            self.set_error_message(warning);
            return;
        }
        info!(path = %path.display(), movies = movies.len(), "catalog reloaded");
        self.catalog.reload(movies);
        self.search = SearchInput::default();
        if self.input_mode == InputMode::Search {
            self.input_mode = InputMode::Normal;
        }
        self.poster_sizes.clear();
        self.process_changes();
        self.set_status_message(format!("Reloaded {} movies", self.catalog.len()));
    }

    // ── Change handling ─────────────────────────────────────────────────────

    /// Drain catalog notifications and keep the selection valid.
    ///
    /// A section toggle only changes rows below the toggled header, so the
    /// selection stays put. Anything wider resets to the top of the list.
    pub fn process_changes(&mut self) {
        for change in self.catalog.take_changes() {
            debug!(?change, "catalog changed");
            if change == Change::All {
                self.selected_index = 0;
                self.scroll_offset = 0;
            }
        }
        self.clamp_selection();
    }

    // ── Posters ─────────────────────────────────────────────────────────────

    /// Byte size of the selected movie's poster, if the poster source has it.
    pub fn selected_poster_size(&mut self) -> Option<usize> {
        let Some(Row::Movie { id }) = self.selected_row() else {
            return None;
        };
        if let Some(size) = self.poster_sizes.get(&id) {
            return *size;
        }
        let size = self
            .catalog
            .movie(id)
            .and_then(|m| self.posters.resolve(&m.poster))
            .map(|bytes| bytes.len());
        self.poster_sizes.insert(id, size);
        size
    }
}

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::{flat_position, row_depth};
use crate::catalog::projector::Row;
use crate::catalog::Catalog;
use crate::theme::ThemeColors;

/// Sectioned catalog list. Only the rows inside the viewport are resolved.
pub struct CatalogListWidget<'a> {
    catalog: &'a Catalog,
    theme: &'a ThemeColors,
    selected: usize,
    scroll_offset: usize,
    block: Option<Block<'a>>,
}

impl<'a> CatalogListWidget<'a> {
    pub fn new(catalog: &'a Catalog, theme: &'a ThemeColors) -> Self {
        Self {
            catalog,
            theme,
            selected: 0,
            scroll_offset: 0,
            block: None,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn marker(is_expanded: bool) -> &'static str {
        if is_expanded {
            "▾ "
        } else {
            "▸ "
        }
    }

    fn row_spans(&self, section: usize, row: &Row) -> Vec<Span<'static>> {
        let indent = "  ".repeat(row_depth(self.catalog, section, row));
        match row {
            Row::Category { title, is_expanded } => vec![Span::styled(
                format!("{}{}{}", indent, Self::marker(*is_expanded), title),
                Style::default()
                    .fg(self.theme.category_fg)
                    .add_modifier(Modifier::BOLD),
            )],
            Row::Subcategory {
                title,
                is_expanded,
                member_count,
            } => vec![
                Span::styled(
                    format!("{}{}{}", indent, Self::marker(*is_expanded), title),
                    Style::default().fg(self.theme.subcategory_fg),
                ),
                Span::styled(
                    format!(" ({})", member_count),
                    Style::default().fg(self.theme.count_fg),
                ),
            ],
            Row::Movie { id } => {
                let Some(movie) = self.catalog.movie(*id) else {
                    return Vec::new();
                };
                vec![
                    Span::styled(
                        format!("{}  {}", indent, movie.title),
                        Style::default().fg(self.theme.movie_fg),
                    ),
                    Span::styled(
                        format!(" ({})", movie.year),
                        Style::default().fg(self.theme.count_fg),
                    ),
                ]
            }
        }
    }
}

impl<'a> Widget for CatalogListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let visible_height = inner_area.height as usize;
        if visible_height == 0 {
            return;
        }

        if self.catalog.is_search_active() && self.catalog.search_row_count() == 0 {
            let line = Line::from(Span::styled(
                format!("No movies match “{}”", self.catalog.query()),
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
            buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
            return;
        }

        for i in 0..visible_height {
            let index = self.scroll_offset + i;
            let Some((section, row_index)) = flat_position(self.catalog, index) else {
                break;
            };
            let Ok(row) = self.catalog.row(section, row_index) else {
                break;
            };

            let mut spans = self.row_spans(section, &row);
            if index == self.selected {
                let selected = Style::default()
                    .bg(self.theme.list_selected_bg)
                    .fg(self.theme.list_selected_fg)
                    .add_modifier(Modifier::BOLD);
                for span in &mut spans {
                    span.style = selected;
                }
                let used: usize = spans.iter().map(|s| s.width()).sum();
                let pad = (inner_area.width as usize).saturating_sub(used);
                spans.push(Span::styled(" ".repeat(pad), selected));
            }

            let y = inner_area.y + i as u16;
            buf.set_line(inner_area.x, y, &Line::from(spans), inner_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_movies;
    use crate::catalog::sort::SortDirection;
    use crate::theme;

    fn sample() -> Catalog {
        Catalog::new(sample_movies(), SortDirection::Ascending)
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn render(catalog: &Catalog, selected: usize, scroll: usize, height: u16) -> Buffer {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 50, height);
        let mut buf = Buffer::empty(area);
        CatalogListWidget::new(catalog, &tc)
            .selected(selected)
            .scroll_offset(scroll)
            .render(area, &mut buf);
        buf
    }

    #[test]
    fn collapsed_catalog_shows_five_headers() {
        let catalog = sample();
        let buf = render(&catalog, 0, 0, 8);
        assert_eq!(line(&buf, 0), "▸ Year");
        assert_eq!(line(&buf, 1), "▸ Genre");
        assert_eq!(line(&buf, 2), "▸ Director");
        assert_eq!(line(&buf, 3), "▸ Actor");
        assert_eq!(line(&buf, 4), "▸ All Movies");
        assert_eq!(line(&buf, 5), "");
    }

    #[test]
    fn expanded_rows_are_indented_with_counts() {
        let mut catalog = sample();
        catalog.toggle(0, 0).unwrap();
        catalog.toggle(0, 1).unwrap(); // 1999
        let buf = render(&catalog, 0, 0, 4);
        assert_eq!(line(&buf, 0), "▾ Year");
        assert_eq!(line(&buf, 1), "  ▾ 1999 (1)");
        assert_eq!(line(&buf, 2), "      American Beauty (1999)");
        assert_eq!(line(&buf, 3), "  ▸ 2006 (1)");
    }

    #[test]
    fn all_movies_rows_sit_one_level_deep() {
        let mut catalog = sample();
        catalog.toggle(4, 0).unwrap();
        let buf = render(&catalog, 0, 4, 2);
        assert_eq!(line(&buf, 0), "▾ All Movies");
        assert_eq!(line(&buf, 1), "    300 (2006)");
    }

    #[test]
    fn selected_row_is_highlighted_full_width() {
        let catalog = sample();
        let buf = render(&catalog, 1, 0, 5);
        let tc = theme::dark_theme();
        assert_eq!(buf.cell((0, 1)).unwrap().bg, tc.list_selected_bg);
        assert_eq!(buf.cell((49, 1)).unwrap().bg, tc.list_selected_bg);
        assert_ne!(buf.cell((0, 0)).unwrap().bg, tc.list_selected_bg);
    }

    #[test]
    fn search_results_render_flat() {
        let mut catalog = sample();
        catalog.set_query("nolan");
        let buf = render(&catalog, 0, 0, 4);
        assert_eq!(line(&buf, 0), "  Inception (2010)");
        assert_eq!(line(&buf, 1), "  Interstellar (2014)");
        assert_eq!(line(&buf, 2), "  The Dark Knight (2008)");
        assert_eq!(line(&buf, 3), "");
    }

    #[test]
    fn empty_search_shows_placeholder() {
        let mut catalog = sample();
        catalog.set_query("zzz");
        let buf = render(&catalog, 0, 0, 2);
        assert_eq!(line(&buf, 0), "No movies match “zzz”");
    }

    #[test]
    fn zero_height_does_not_panic() {
        let catalog = sample();
        render(&catalog, 0, 0, 0);
    }
}

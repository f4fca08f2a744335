use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::catalog::movie::Movie;
use crate::theme::ThemeColors;

const BAR_WIDTH: usize = 10;

/// Details of the selected movie: metadata, plot, ratings and poster availability.
pub struct DetailWidget<'a> {
    movie: Option<&'a Movie>,
    poster_size: Option<usize>,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

/// Render a 0–100 percentage as a fixed-width bar.
fn rating_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Human-readable byte size.
fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

impl<'a> DetailWidget<'a> {
    pub fn new(movie: Option<&'a Movie>, theme: &'a ThemeColors) -> Self {
        Self {
            movie,
            poster_size: None,
            theme,
            block: None,
        }
    }

    pub fn poster_size(mut self, size: Option<usize>) -> Self {
        self.poster_size = size;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn field(&self, label: &str, value: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{:<10}", label),
                Style::default().fg(self.theme.detail_label_fg),
            ),
            Span::styled(value.to_string(), Style::default().fg(self.theme.detail_fg)),
        ])
    }

    fn build_lines(&self, movie: &Movie) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                movie.title.clone(),
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} · {} · Released {}", movie.year, movie.rated, movie.released),
                Style::default().fg(self.theme.dim_fg),
            )),
            Line::from(""),
            self.field("Genre", &movie.genre),
            self.field("Director", &movie.director),
        ];
        if !movie.writer.is_empty() {
            lines.push(self.field("Writer", &movie.writer));
        }
        lines.push(self.field("Cast", &movie.actors));
        lines.push(self.field("Language", &movie.language));

        if !movie.plot.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                movie.plot.clone(),
                Style::default().fg(self.theme.detail_fg),
            )));
        }

        if !movie.ratings.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Ratings",
                Style::default()
                    .fg(self.theme.detail_label_fg)
                    .add_modifier(Modifier::BOLD),
            )));
            for rating in &movie.ratings {
                let percent = rating.percentage();
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:>4.0}% ", percent),
                        Style::default().fg(self.theme.detail_fg),
                    ),
                    Span::styled(rating_bar(percent), Style::default().fg(self.theme.success_fg)),
                    Span::styled(
                        format!(" {}", rating.source),
                        Style::default().fg(self.theme.dim_fg),
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        let poster = match self.poster_size {
            Some(size) => Span::styled(
                format!("cached ({})", format_size(size)),
                Style::default().fg(self.theme.success_fg),
            ),
            None => Span::styled("not cached", Style::default().fg(self.theme.dim_fg)),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", "Poster"),
                Style::default().fg(self.theme.detail_label_fg),
            ),
            poster,
        ]));
        lines
    }
}

impl<'a> Widget for DetailWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match self.movie {
            Some(movie) => self.build_lines(movie),
            None => vec![Line::from(Span::styled(
                "Select a movie to see its details",
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::ITALIC),
            ))],
        };

        let mut paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_movies;
    use crate::catalog::movie::Rating;
    use crate::theme;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(movie: Option<&Movie>, poster: Option<usize>) -> Buffer {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        DetailWidget::new(movie, &tc)
            .poster_size(poster)
            .render(area, &mut buf);
        buf
    }

    #[test]
    fn rating_bar_scales() {
        assert_eq!(rating_bar(0.0), "░".repeat(10));
        assert_eq!(rating_bar(100.0), "█".repeat(10));
        assert_eq!(rating_bar(84.0), format!("{}{}", "█".repeat(8), "░".repeat(2)));
        assert_eq!(rating_bar(250.0), "█".repeat(10));
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn no_selection_shows_hint() {
        let buf = render(None, None);
        assert!(screen(&buf).contains("Select a movie"));
    }

    #[test]
    fn shows_metadata_ratings_and_poster() {
        let mut movie = sample_movies().remove(0);
        movie.ratings = vec![Rating {
            source: "Metacritic".into(),
            value: "83/100".into(),
        }];
        let buf = render(Some(&movie), Some(2048));
        let text = screen(&buf);
        assert!(text.starts_with(&movie.title));
        assert!(text.contains("Director"));
        assert!(text.contains("83%"));
        assert!(text.contains("Metacritic"));
        assert!(text.contains("cached (2.0 KB)"));
    }

    #[test]
    fn missing_poster_is_reported() {
        let movie = sample_movies().remove(0);
        let text = screen(&render(Some(&movie), None));
        assert!(text.contains("not cached"));
    }
}

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " /:search  s:sort  ?:help  q:quit ";

/// Status bar widget: mode summary on the left, sort and key hints on the right,
/// or a transient status message across the whole bar.
pub struct StatusBarWidget<'a> {
    summary: &'a str,
    sort_label: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

/// Keep at most `width` chars of `s`.
fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(summary: &'a str, sort_label: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            summary,
            sort_label,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };
            let display = format!("{:<width$}", truncate(msg, width), width = width);
            buf.set_line(area.x, area.y, &Line::from(Span::styled(display, style)), area.width);
            return;
        }

        let sort = format!(" {} ", self.sort_label);
        let right_len = sort.chars().count() + KEY_HINTS.chars().count();
        let summary = truncate(self.summary, width.saturating_sub(right_len));
        let gap = width
            .saturating_sub(summary.chars().count())
            .saturating_sub(right_len);

        let spans = vec![
            Span::styled(summary, Style::default().fg(self.theme.status_fg)),
            Span::raw(" ".repeat(gap)),
            Span::styled(
                sort,
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                KEY_HINTS,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ),
        ];
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

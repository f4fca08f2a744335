use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::SearchInput;
use crate::theme::ThemeColors;

/// One-line search bar: `/ query▏ 3 results`.
pub struct SearchBarWidget<'a> {
    input: &'a SearchInput,
    result_count: usize,
    focused: bool,
    theme: &'a ThemeColors,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(input: &'a SearchInput, result_count: usize, theme: &'a ThemeColors) -> Self {
        Self {
            input,
            result_count,
            focused: false,
            theme,
        }
    }

    /// Draw the cursor; the bar is focused while typing.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for SearchBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let query = self.input.query.as_str();
        let text_style = Style::default().fg(self.theme.movie_fg);
        let mut spans = vec![Span::styled(
            "/ ",
            Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )];

        if self.focused {
            let pos = self.input.cursor_position.min(query.len());
            let (before, rest) = query.split_at(pos);
            let mut chars = rest.chars();
            let cursor_char = chars
                .next()
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let cursor_style = Style::default()
                .fg(self.theme.list_selected_fg)
                .bg(self.theme.list_selected_bg)
                .add_modifier(Modifier::REVERSED);
            spans.push(Span::styled(before.to_string(), text_style));
            spans.push(Span::styled(cursor_char, cursor_style));
            spans.push(Span::styled(chars.as_str().to_string(), text_style));
        } else {
            spans.push(Span::styled(query.to_string(), text_style));
        }

        let count = match self.result_count {
            1 => " 1 result".to_string(),
            n => format!(" {} results", n),
        };
        spans.push(Span::styled(count, Style::default().fg(self.theme.info_fg)));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

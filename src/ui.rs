use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, InputMode};
use crate::components::catalog_list::CatalogListWidget;
use crate::components::detail::DetailWidget;
use crate::components::help::HelpOverlay;
use crate::components::search::SearchBarWidget;
use crate::components::status_bar::StatusBarWidget;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let show_search = app.input_mode == InputMode::Search || app.catalog.is_search_active();

    let mut constraints = vec![Constraint::Min(3)];
    if show_search {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let main_area = rows[0];
    let status_area = rows[rows.len() - 1];

    let (list_area, detail_area) = if app.show_detail {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_area);
        (cols[0], Some(cols[1]))
    } else {
        (main_area, None)
    };

    render_list(app, frame, list_area);
    if let Some(detail_area) = detail_area {
        render_detail(app, frame, detail_area);
    }

    if show_search {
        let bar = SearchBarWidget::new(&app.search, app.catalog.search_row_count(), &app.theme)
            .focused(app.input_mode == InputMode::Search);
        frame.render_widget(bar, rows[1]);
    }

    render_status_bar(app, frame, status_area);

    if app.input_mode == InputMode::Help {
        frame.render_widget(HelpOverlay::new(&app.theme, app.help_scroll), area);
    }
}

fn render_list(app: &mut App, frame: &mut Frame, area: Rect) {
    // Keep the selection visible inside the bordered list
    let visible_height = area.height.saturating_sub(2) as usize;
    app.update_scroll(visible_height);

    let focused = app.input_mode == InputMode::Normal;
    let border = if focused {
        app.theme.border_focused_fg
    } else {
        app.theme.border_fg
    };
    let block = Block::default()
        .title(" CineMate ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let list = CatalogListWidget::new(&app.catalog, &app.theme)
        .selected(app.selected_index)
        .scroll_offset(app.scroll_offset)
        .block(block);
    frame.render_widget(list, area);
}

fn render_detail(app: &mut App, frame: &mut Frame, area: Rect) {
    let poster_size = app.selected_poster_size();
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg));
    let detail = DetailWidget::new(app.selected_movie(), &app.theme)
        .poster_size(poster_size)
        .block(block);
    frame.render_widget(detail, area);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let summary = app.summary();
    let sort_label = app.catalog.sort_direction().label();
    let mut bar = StatusBarWidget::new(&summary, sort_label, &app.theme);
    if let Some((msg, _)) = &app.status_message {
        bar = bar.status_message(msg, app.status_is_error);
    }
    frame.render_widget(bar, area);
}

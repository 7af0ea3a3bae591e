//! Panel renderer for skiff.
//!
//! The top-level [render] entry point draws the panel inside the
//! geometry-derived rectangle, or nothing at all while the host hides it.
//!
//! This module stays pure rendering: it reads state and produces widgets,
//! without owning any engine logic. Row content comes prebuilt from the
//! row cache; only highlight state and the summary banners are derived
//! per frame.

use crate::app::dispatch::ActionMode;
use crate::app::state::AppState;
use crate::ui::overlays::Overlay;
use crate::ui::rows::{RowKind, selection_line, status_line};
use crate::ui::styles;
use crate::utils::sanitize_to_exact_width;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

const SIZE_COL_WIDTH: usize = 10;

/// Renders one frame of the panel.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let sheet = styles::current();
    let area = frame.area();

    let Some(rect) = app.panel_rect() else {
        // Host node collapsed or canvas unavailable: the panel hides
        // entirely.
        return;
    };
    let panel = Rect::new(rect.x, rect.y, rect.width, rect.height).intersection(area);
    if panel.width < 4 || panel.height < 4 {
        return;
    }

    app.sync_rows();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(sheet.border)
        .title(" skiff ");
    let inner = block.inner(panel);
    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);

    let has_selbar = !app.selection().is_empty();
    let has_banner = app.banner().is_some();

    let mut constraints = vec![Constraint::Length(1)];
    if has_selbar {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Length(1));
    if has_banner {
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::vertical(constraints).split(inner);

    let mut chunk = 0;
    render_path_bar(frame, chunks[chunk], app);
    chunk += 1;

    if has_selbar {
        render_selection_bar(frame, chunks[chunk], app);
        chunk += 1;
    }

    let list_area = chunks[chunk];
    render_list(frame, list_area, app);
    chunk += 1;

    render_status_bar(frame, chunks[chunk], app);
    chunk += 1;

    if has_banner {
        render_banner(frame, chunks[chunk], app);
    }

    match app.actions().mode() {
        ActionMode::Input { prompt, .. } => {
            let prompt = prompt.clone();
            render_input_overlay(frame, panel, &prompt, app);
        }
        ActionMode::ConfirmDelete { names } => {
            let names = names.clone();
            render_confirm_overlay(frame, panel, &names);
        }
        ActionMode::Normal => {}
    }

    if app.drag().overlay_active() {
        render_drop_overlay(frame, list_area);
    }
}

fn render_path_bar(frame: &mut Frame, area: Rect, app: &AppState) {
    let sheet = styles::current();
    let text = format!("/{}", app.nav().current_path());
    frame.render_widget(Paragraph::new(text).style(sheet.accent), area);
}

fn render_selection_bar(frame: &mut Frame, area: Rect, app: &AppState) {
    let sheet = styles::current();
    let text = selection_line(app.nav(), app.selection());
    frame.render_widget(
        Paragraph::new(text).style(sheet.accent.bg(sheet.selection_bg)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &AppState) {
    let sheet = styles::current();
    let text = status_line(app.nav(), app.selection());
    frame.render_widget(Paragraph::new(text).style(sheet.muted), area);
}

fn render_banner(frame: &mut Frame, area: Rect, app: &AppState) {
    let sheet = styles::current();
    let Some(Overlay::Message { text, error }) = app.banner() else {
        return;
    };
    let style = if *error { sheet.error } else { sheet.success };
    frame.render_widget(Paragraph::new(text.as_str()).style(style), area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &AppState) {
    let sheet = styles::current();

    if app.is_busy() {
        frame.render_widget(
            Paragraph::new("Loading...")
                .style(sheet.accent)
                .centered(),
            area,
        );
        return;
    }
    if app.rows().is_empty() {
        frame.render_widget(
            Paragraph::new("Empty directory")
                .style(sheet.muted)
                .centered(),
            area,
        );
        return;
    }

    let show_icons = app.config().general().icons();
    let icon_width = if show_icons { 2 } else { 0 };
    let name_width = (area.width as usize)
        .saturating_sub(2 + icon_width + 1 + SIZE_COL_WIDTH)
        .max(1);

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| {
            let is_parent = row.kind == RowKind::Parent;
            let selected = !is_parent && app.selection().contains(&row.name);

            let base = match row.kind {
                RowKind::Parent => sheet.parent_row,
                RowKind::Dir => sheet.directory,
                RowKind::File => sheet.item,
            };
            let style = if selected { base.bg(sheet.selection_bg) } else { base };

            let mut spans = vec![Span::styled(
                if selected { "✓ " } else { "  " },
                sheet.accent,
            )];
            if show_icons {
                spans.push(Span::raw(format!("{} ", row.icon)));
            }
            spans.push(Span::styled(
                sanitize_to_exact_width(&row.name, name_width),
                style,
            ));
            spans.push(Span::styled(
                format!(" {:>width$}", row.size, width = SIZE_COL_WIDTH),
                sheet.muted,
            ));

            ListItem::new(Line::from(spans).style(if selected {
                Style::default().bg(sheet.selection_bg)
            } else {
                Style::default()
            }))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.cursor()));
    let list = List::new(items).highlight_style(sheet.cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_input_overlay(frame: &mut Frame, panel: Rect, prompt: &str, app: &AppState) {
    let sheet = styles::current();
    let area = centered_rect(panel, panel.width.saturating_sub(6).min(48).max(20), 3);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(sheet.accent)
        .title(format!(" {} ", prompt));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // The buffer with a visible cursor cell.
    let buffer = app.actions().input_buffer();
    let cursor = app.actions().input_cursor_pos().min(buffer.len());
    let (before, rest) = buffer.split_at(cursor);
    let mut chars = rest.chars();
    let at_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".into());
    let after: String = chars.collect();

    let line = Line::from(vec![
        Span::raw(before.to_string()),
        Span::styled(at_cursor, sheet.cursor),
        Span::raw(after),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_confirm_overlay(frame: &mut Frame, panel: Rect, names: &[String]) {
    let sheet = styles::current();
    let shown = names.iter().take(6);
    let height = (4 + names.len().min(6) + usize::from(names.len() > 6)) as u16;
    let area = centered_rect(panel, panel.width.saturating_sub(6).min(44).max(20), height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(sheet.error)
        .title(" Delete ");
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(if names.len() == 1 {
        format!("Delete \"{}\"?", names[0])
    } else {
        format!("Delete {} items?", names.len())
    })];
    for name in shown {
        lines.push(Line::from(Span::styled(format!("  {}", name), sheet.muted)));
    }
    if names.len() > 6 {
        lines.push(Line::from(Span::styled(
            format!("  ...and {} more", names.len() - 6),
            sheet.muted,
        )));
    }
    lines.push(Line::from(Span::styled("[y] delete   [n] cancel", sheet.accent)));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_drop_overlay(frame: &mut Frame, list_area: Rect) {
    let sheet = styles::current();
    let area = centered_rect(list_area, list_area.width.saturating_sub(4).max(10), 3);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(sheet.accent);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new("Drop files here to upload")
            .style(sheet.accent)
            .centered(),
        inner,
    );
}

/// A centered sub-rectangle of `outer`, clamped to fit.
fn centered_rect(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect::new(
        outer.x + (outer.width - width) / 2,
        outer.y + (outer.height - height) / 2,
        width,
        height,
    )
}

use ratatui::{
    Frame,
    layout::{Layout, Direction, Constraint, Rect, Alignment},
    widgets::{Block, Borders, BorderType, Paragraph, Wrap, Clear},
    style::{Style, Modifier},
    text::{Line, Span},
};
use crate::app::{App, Pane};
use crate::constants::ui::{MIN_HEIGHT, MIN_WIDTH};
use crate::types::DisplayItem;
use crate::util_text::format_amount;

// ===============================
// Top-level draw
// ===============================
pub fn draw(f:&mut Frame, app:&mut App){
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        too_small(f, area, app);
        return;
    }

    let show_debug = app.debug_visible() && !app.debug_log().is_empty();

    let mut constraints: Vec<Constraint> = Vec::with_capacity(4);
    constraints.push(Constraint::Length(2));                                // header
    constraints.push(Constraint::Min(0));                                   // grid (fills remainder)
    if show_debug { constraints.push(Constraint::Length(6)); }              // debug
    constraints.push(Constraint::Length(2));                                // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut idx = 0usize;
    header(f, chunks[idx], app); idx += 1;
    body(f, chunks[idx], app); idx += 1;
    if show_debug {
        debug_panel(f, chunks[idx], app); idx += 1;
    }
    footer(f, chunks[idx], app);

    // Overlays render last
    draw_details_popup(f, app);
    if app.toast_message().is_some() {
        draw_toast_modal(f, app);
    }
}

fn too_small(f:&mut Frame, area:Rect, app:&App){
    let colors = app.colors();
    let msg = format!(
        "Terminal too small ({}x{}), need at least {}x{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let w = Paragraph::new(msg)
        .style(Style::default().fg(colors.text).bg(colors.background))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(w, area);
}

fn header(f:&mut Frame, area:Rect, app:&App){
    let colors = app.colors();
    let selected = app.pane();

    // Tab bar with box-drawing borders
    let mut spans = Vec::new();
    for (i, pane) in [Pane::Blocks, Pane::Transactions].into_iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "┌─" } else { "┬─" }));
        let title = format!("{} ({})", pane.title(), app.visualizer(pane).len());
        if pane == selected {
            spans.push(Span::styled(
                title,
                Style::default().fg(colors.focus_border).add_modifier(Modifier::BOLD)
            ));
        } else {
            spans.push(Span::styled(title, Style::default().fg(colors.text_dim)));
        }
        spans.push(Span::raw("─"));
    }
    spans.push(Span::raw("┐"));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(colors.text))
        .block(Block::default().borders(Borders::BOTTOM).border_type(BorderType::Plain)
            .border_style(Style::default().fg(colors.unfocused_border)));
    f.render_widget(paragraph, area);
}

fn body(f:&mut Frame, area:Rect, app:&mut App){
    let colors = app.colors();
    f.render_widget(Block::default().style(Style::default().bg(colors.background)), area);

    // Visualizers work in pixels; keep them sized to the drawable area
    app.set_grid_area(area);

    let viz = app.active_visualizer();
    let Some(size) = viz.cell_size() else {
        let hint = Paragraph::new("Waiting for blocks…")
            .style(Style::default().fg(colors.text_dim).bg(colors.background))
            .alignment(Alignment::Center);
        f.render_widget(hint, area);
        return;
    };

    let scale = app.pixel_scale();
    let max_fee = viz.entries().map(|(item, _)| item.fee).max().unwrap_or(0);
    let selected = app.selected();

    for (item, state) in viz.entries() {
        let Some(rect) = scale.to_cell_rect(area, state.position(), size, size) else {
            continue;
        };
        let heat = if max_fee == 0 { 0.0 } else { item.fee as f64 / max_fee as f64 };
        let fill = if selected == Some(&item.key) { colors.selection } else { colors.heat(heat) };

        let label = item_label(app.pane(), item);
        let text = if rect.width as usize >= label.chars().count() { label } else { String::new() };
        let tile = Paragraph::new(text)
            .style(Style::default().bg(fill).fg(colors.item_label).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(tile, rect);
    }
}

fn item_label(pane: Pane, item: &DisplayItem) -> String {
    match pane {
        Pane::Blocks => item.count.to_string(),
        Pane::Transactions => format_amount(item.fee),
    }
}

fn footer(f:&mut Frame, area:Rect, app:&App){
    let colors = app.colors();
    let key = Style::default().fg(colors.focus_border);
    let mut spans: Vec<Span> = Vec::with_capacity(24);

    spans.push(Span::styled("Tab", key));
    spans.push(Span::raw(" switch │ "));
    spans.push(Span::styled("Enter", key));
    spans.push(Span::raw(" newest │ "));
    spans.push(Span::styled("r", key));
    spans.push(Span::raw(" replay │ "));
    spans.push(Span::styled("t", key));
    spans.push(Span::raw(" theme │ "));
    spans.push(Span::styled("Ctrl+D", key));
    spans.push(Span::raw(" debug │ "));
    spans.push(Span::styled("q", key));
    spans.push(Span::raw(" quit"));

    if app.ui_flags().stats_overlay {
        let viz = app.active_visualizer();
        spans.push(Span::raw(" │ "));
        if viz.is_settled() {
            spans.push(Span::styled("settled", Style::default().fg(colors.toast_success)));
        } else {
            spans.push(Span::styled(
                format!("{} moving", viz.active_count()),
                Style::default().fg(colors.focus_border),
            ));
        }
    }
    if app.debug_visible() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("[DEBUG]", Style::default().fg(colors.debug_indicator)));
    }
    spans.push(Span::raw(format!(" │ FPS {}", app.fps())));

    let w = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(colors.text))
        .block(Block::default().borders(Borders::TOP).border_type(BorderType::Plain)
            .border_style(Style::default().fg(colors.unfocused_border)));
    f.render_widget(w, area);
}

fn debug_panel(f:&mut Frame, area:Rect, app:&App){
    let colors = app.colors();
    let log = app.debug_log();

    let lines_to_show = (area.height.saturating_sub(2)) as usize; // inner height
    let start = log.len().saturating_sub(lines_to_show);
    let lines: Vec<Line> = log[start..].iter().map(|msg| Line::from(Span::raw(msg.as_str()))).collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(colors.text_dim))
        .block(Block::default()
            .title(" Debug ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.debug_indicator)));

    f.render_widget(paragraph, area);
}

// ===============================
// Overlays
// ===============================
fn draw_details_popup(f:&mut Frame, app:&App){
    let Some(details) = app.details() else { return };
    let colors = app.colors();

    let area = f.area();
    let width = ((area.width * 6) / 10).max(30).min(area.width);
    let height = (details.lines.len() as u16 + 2).min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);

    let lines: Vec<Line> = details.lines.iter().map(|(k, v)| {
        Line::from(vec![
            Span::styled(format!("{k:>12}: "), Style::default().fg(colors.text_dim)),
            Span::styled(v.as_str(), Style::default().fg(colors.text)),
        ])
    }).collect();

    let block = Block::default()
        .title(format!(" {} ", details.title))
        .title_bottom(Line::from(" Esc close ").alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.focus_border));

    let w = Paragraph::new(lines)
        .style(Style::default().bg(colors.background))
        .block(block);
    f.render_widget(w, overlay);
}

fn draw_toast_modal(f: &mut Frame, app: &App) {
    let message = app.toast_message().unwrap_or("");
    let colors = app.colors();

    // Small centered box (40% width, 3 lines height)
    let area = f.area();
    let width = (area.width * 4) / 10;
    let height = 3;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.toast_success));

    let text = Paragraph::new(format!("✓ {message}"))
        .style(Style::default().fg(colors.toast_success).bg(colors.background).add_modifier(Modifier::BOLD))
        .block(block);

    f.render_widget(text, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_from, CliArgs};
    use crate::types::{AppEvent, BlockRow};
    use ratatui::{backend::TestBackend, Terminal};

    fn block(height: u64) -> BlockRow {
        BlockRow {
            height,
            hash: format!("h{height}"),
            prev_hash: None,
            timestamp: 0,
            tx_count: 7,
            size: 100,
            total_fee: height,
            when: String::new(),
            transactions: vec![],
        }
    }

    fn app() -> App {
        let cfg = load_from(CliArgs {
            seed: Some(1),
            reduced_motion: Some(true),
            ..CliArgs::default()
        })
        .unwrap();
        App::new(&cfg)
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn draw_sizes_grid_and_paints_tiles() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(1)));
        app.on_event(AppEvent::NewBlock(block(2)));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert_eq!(app.grid_area().width, 80);
        assert!(app.active_visualizer().cell_size().is_some());
        let text = screen(&terminal);
        assert!(text.contains("Blocks (2)"));
        assert!(text.contains("settled"));
        assert!(text.contains('7'));
    }

    #[test]
    fn tiny_terminal_shows_warning() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(screen(&terminal).contains("too small"));
    }

    #[test]
    fn details_popup_lists_fields() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(4)));
        app.activate_newest();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Block #4"));
        assert!(text.contains("Transactions: 7"));
    }
}

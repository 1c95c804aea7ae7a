//! TUI rendering for Roster using ratatui.

mod effects;
mod form_modal;
mod input;
mod tables;
mod theme;

pub use effects::apply_modal_effect;
pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
};

use roster_engine::{App, InputMode, StatusKind, Tab};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Tabs + add button
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette, &glyphs);
    tables::draw_table(frame, app, chunks[2], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[3], &palette, &glyphs);

    if app.input_mode() == InputMode::Form {
        form_modal::draw_form_modal(frame, app, &palette, &glyphs);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let active = app.active_tab();
    let add_label = format!(" {} {} ", glyphs.add, active.add_label());
    let add_width = u16::try_from(add_label.len() + 4).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(add_width)])
        .split(area);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            Line::from(format!(
                " {} {} ({}) ",
                tab.index() + 1,
                tab.title(),
                app.row_count(*tab)
            ))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(styles::tab_inactive(palette))
        .highlight_style(styles::tab_active(palette))
        .divider(Span::styled(glyphs.separator, styles::key_hint(palette)))
        .padding("", "");
    frame.render_widget(tabs, chunks[0]);

    let add = Paragraph::new(Line::from(vec![
        Span::styled(
            add_label,
            Style::default()
                .fg(palette.bg_dark)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" a", styles::key_highlight(palette)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(add, chunks[1]);
}

pub(crate) fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (mode_label, mode_style) = match app.input_mode() {
        InputMode::Normal => ("NORMAL", styles::mode_normal(palette)),
        InputMode::Form => ("FORM", styles::mode_form(palette)),
    };

    let mut spans = vec![
        Span::styled(format!(" {mode_label} "), mode_style),
        Span::raw(" "),
    ];

    if let Some(status) = app.status() {
        let (prefix, color) = match status.kind {
            StatusKind::Error => ("Error: ", palette.error),
            StatusKind::Warning => ("Warning: ", palette.warning),
            StatusKind::Success => ("", palette.success),
        };
        spans.push(Span::styled(
            format!("{prefix}{}", status.text),
            Style::default().fg(color),
        ));
    } else {
        let store = app.store();
        spans.push(Span::styled(
            format!(
                "{} students {sep} {} courses {sep} {} enrollments",
                store.students().len(),
                store.courses().len(),
                store.enrollments().len(),
                sep = glyphs.separator,
            ),
            Style::default().fg(palette.text_secondary),
        ));
    }

    let hints = match app.input_mode() {
        InputMode::Normal => vec![
            Span::styled("1-3", styles::key_highlight(palette)),
            Span::styled(" tab  ", styles::key_hint(palette)),
            Span::styled("j/k", styles::key_highlight(palette)),
            Span::styled(" select  ", styles::key_hint(palette)),
            Span::styled("a", styles::key_highlight(palette)),
            Span::styled(" add  ", styles::key_hint(palette)),
            Span::styled("e", styles::key_highlight(palette)),
            Span::styled(" edit  ", styles::key_hint(palette)),
            Span::styled("d", styles::key_highlight(palette)),
            Span::styled(" delete  ", styles::key_hint(palette)),
            Span::styled("q", styles::key_highlight(palette)),
            Span::styled(" quit ", styles::key_hint(palette)),
        ],
        InputMode::Form => vec![
            Span::styled("Tab", styles::key_highlight(palette)),
            Span::styled(" next field  ", styles::key_hint(palette)),
            Span::styled("Enter", styles::key_highlight(palette)),
            Span::styled(" save  ", styles::key_hint(palette)),
            Span::styled("Esc", styles::key_highlight(palette)),
            Span::styled(" cancel ", styles::key_hint(palette)),
        ],
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(line_width(&hints))])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Right),
        chunks[1],
    );
}

fn line_width(spans: &[Span]) -> u16 {
    let width: usize = spans.iter().map(Span::width).sum();
    u16::try_from(width).unwrap_or(u16::MAX)
}

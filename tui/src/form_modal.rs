//! Centered modal that renders the open entity form.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use roster_engine::{App, FormRowKind};
use roster_types::sanitize_cell_text;

use crate::apply_modal_effect;
use crate::theme::{Glyphs, Palette, styles};

const MODAL_WIDTH: u16 = 64;
const VALUE_INDENT: u16 = 2;

pub(crate) fn draw_form_modal(
    frame: &mut Frame,
    app: &mut App,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let area = frame.area();
    let Some(form) = app.form() else {
        return;
    };

    let modal_width = MODAL_WIDTH
        .min(area.width.saturating_sub(4))
        .max(20)
        .min(area.width);
    let content_width = modal_width.saturating_sub(4).max(1) as usize; // borders + padding
    let indent = " ".repeat(VALUE_INDENT as usize);

    let mut lines: Vec<Line> = Vec::new();
    // (line index, display column) of the caret inside the content area
    let mut caret: Option<(usize, usize)> = None;

    for row in form.rows(app.store()) {
        lines.push(Line::from(Span::styled(
            row.label,
            styles::field_label(palette, row.focused),
        )));

        let value = sanitize_cell_text(&row.value);
        let value_style = if row.placeholder {
            Style::default().fg(palette.text_muted)
        } else {
            Style::default().fg(palette.text_primary)
        };
        let line = match row.kind {
            FormRowKind::Text { caret: at } => {
                let max_width = content_width.saturating_sub(indent.len() + 1);
                let shown = visible_tail(&value, at, max_width);
                if let Some(col) = shown.caret_col {
                    caret = Some((lines.len(), indent.len() + col));
                }
                let mut style = value_style;
                if row.focused {
                    style = style.bg(palette.bg_highlight);
                }
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(shown.text, style),
                ])
            }
            FormRowKind::Choice => {
                let arrow_style = if row.focused {
                    styles::key_highlight(palette)
                } else {
                    styles::key_hint(palette)
                };
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(glyphs.choice_left, arrow_style),
                    Span::raw(" "),
                    Span::styled(value.into_owned(), value_style),
                    Span::raw(" "),
                    Span::styled(glyphs.choice_right, arrow_style),
                ])
            }
        };
        lines.push(line);

        if let Some(error) = row.error {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(format!("{} {error}", glyphs.error), styles::field_error(palette)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        glyphs.divider.repeat(content_width),
        Style::default().fg(palette.bg_border),
    )));
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", form.submit_label()),
            Style::default()
                .fg(palette.bg_dark)
                .bg(palette.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Enter  ", styles::key_hint(palette)),
        Span::styled("Esc", styles::key_highlight(palette)),
        Span::styled(" cancel", styles::key_hint(palette)),
    ]));

    let title = form.title();
    let inner_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let modal_height = inner_height
        .saturating_add(4) // borders + vertical padding
        .min(area.height);

    let base_area = Rect {
        x: area.x + (area.width.saturating_sub(modal_width) / 2),
        y: area.y + (area.height.saturating_sub(modal_height) / 2),
        width: modal_width,
        height: modal_height,
    };

    let elapsed = app.frame_elapsed();
    let (modal_area, effect_done) = if let Some(effect) = app.modal_effect_mut() {
        effect.advance(elapsed);
        (
            apply_modal_effect(effect, base_area, area),
            effect.is_finished(),
        )
    } else {
        (base_area, false)
    };

    if effect_done {
        app.clear_modal_effect();
    }

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_popup))
        .padding(Padding::uniform(1))
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )))
        .title(
            Line::from(Span::styled(
                format!(" Esc {} ", glyphs.close),
                styles::key_hint(palette),
            ))
            .alignment(Alignment::Right),
        );

    frame.render_widget(Paragraph::new(lines).block(block), modal_area);

    if let Some((line, col)) = caret {
        let x = modal_area
            .x
            .saturating_add(2)
            .saturating_add(u16::try_from(col).unwrap_or(u16::MAX));
        let y = modal_area
            .y
            .saturating_add(2)
            .saturating_add(u16::try_from(line).unwrap_or(u16::MAX));
        let right = modal_area.right().saturating_sub(2);
        let bottom = modal_area.bottom().saturating_sub(2);
        if x < right && y < bottom {
            frame.set_cursor_position((x, y));
        }
    }
}

struct VisibleText {
    text: String,
    caret_col: Option<usize>,
}

/// Slice `value` so the caret stays inside `max_width` columns.
///
/// `caret` is a grapheme index. Text before the caret is dropped from the left
/// when it would push the caret past the edge.
fn visible_tail(value: &str, caret: Option<usize>, max_width: usize) -> VisibleText {
    let graphemes: Vec<&str> = value.graphemes(true).collect();
    let Some(caret) = caret else {
        let mut width = 0;
        let text = graphemes
            .iter()
            .take_while(|g| {
                width += g.width();
                width <= max_width
            })
            .copied()
            .collect();
        return VisibleText {
            text,
            caret_col: None,
        };
    };

    let caret = caret.min(graphemes.len());
    let mut start = 0;
    while start < caret && width_of(&graphemes[start..caret]) >= max_width {
        start += 1;
    }

    let mut width = 0;
    let text: String = graphemes[start..]
        .iter()
        .take_while(|g| {
            width += g.width();
            width <= max_width
        })
        .copied()
        .collect();
    VisibleText {
        text,
        caret_col: Some(width_of(&graphemes[start..caret])),
    }
}

fn width_of(graphemes: &[&str]) -> usize {
    graphemes.iter().map(|g| g.width()).sum()
}

//! Entity tables, one per tab.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState},
};

use roster_engine::{App, EntityStore, Tab};
use roster_types::{DATE_FORMAT, EnrollmentStatus, sanitize_cell_text};

use crate::theme::{Glyphs, Palette, styles};

const ACTIONS_WIDTH: u16 = 16;

pub(crate) fn draw_table(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let tab = app.active_tab();
    let store = app.store();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1))
        .title(Line::from(Span::styled(
            format!(" {} ", tab.title()),
            styles::table_header(palette),
        )));

    let Some(selected) = app.selected_row(tab) else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No {}s yet.", tab.noun()),
                Style::default().fg(palette.text_secondary),
            )),
            Line::from(vec![
                Span::styled("Press ", styles::key_hint(palette)),
                Span::styled("a", styles::key_highlight(palette)),
                Span::styled(
                    format!(" to {}.", tab.add_label().to_lowercase()),
                    styles::key_hint(palette),
                ),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let (header, widths, rows) = match tab {
        Tab::Students => student_rows(store, glyphs),
        Tab::Courses => course_rows(store),
        Tab::Enrollments => enrollment_rows(store, glyphs),
    };

    let header = Row::new(
        header
            .iter()
            .copied()
            .chain(std::iter::once("Actions"))
            .map(|title| Cell::from(title).style(styles::table_header(palette))),
    );

    let rows: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let actions = if i == selected {
                Line::from(vec![
                    Span::styled("e", styles::key_highlight(palette)),
                    Span::raw(" Edit  "),
                    Span::styled("d", styles::key_highlight(palette)),
                    Span::raw(" Delete"),
                ])
            } else {
                Line::from(Span::styled("Edit  Delete", styles::key_hint(palette)))
            };
            Row::new(
                cells
                    .into_iter()
                    .map(Cell::from)
                    .chain(std::iter::once(Cell::from(actions))),
            )
            .style(Style::default().fg(palette.text_primary))
        })
        .collect();

    let widths: Vec<Constraint> = widths
        .into_iter()
        .chain(std::iter::once(Constraint::Length(ACTIONS_WIDTH)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header.bottom_margin(1))
        .block(block)
        .column_spacing(2)
        .row_highlight_style(styles::row_selected(palette))
        .highlight_symbol(format!("{} ", glyphs.selected));

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

type TableParts = (&'static [&'static str], Vec<Constraint>, Vec<Vec<String>>);

fn cell(text: &str) -> String {
    sanitize_cell_text(text).into_owned()
}

fn student_rows(store: &EntityStore, glyphs: &Glyphs) -> TableParts {
    let rows = store
        .students()
        .iter()
        .map(|s| {
            vec![
                cell(&s.first_name),
                cell(&s.last_name),
                cell(&s.email),
                cell(&s.phone),
                s.birth_date.format(DATE_FORMAT).to_string(),
                format!("{} {}", glyphs.image, cell(&s.profile_url)),
            ]
        })
        .collect();
    (
        &[
            "First name",
            "Last name",
            "Email",
            "Phone",
            "Birth date",
            "Profile",
        ],
        vec![
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Fill(2),
        ],
        rows,
    )
}

fn course_rows(store: &EntityStore) -> TableParts {
    let rows = store
        .courses()
        .iter()
        .map(|c| {
            vec![
                cell(&c.name),
                cell(&c.description),
                c.duration_hours.to_string(),
            ]
        })
        .collect();
    (
        &["Course", "Description", "Hours"],
        vec![
            Constraint::Fill(1),
            Constraint::Fill(3),
            Constraint::Length(6),
        ],
        rows,
    )
}

fn enrollment_rows(store: &EntityStore, glyphs: &Glyphs) -> TableParts {
    let rows = store
        .enrollments()
        .iter()
        .map(|e| {
            let names = store.enrollment_names(e);
            let status_glyph = match e.status {
                EnrollmentStatus::Active => glyphs.active,
                EnrollmentStatus::Inactive => glyphs.inactive,
            };
            vec![
                names
                    .student
                    .map_or_else(|| e.student.to_string(), |s| cell(&s.full_name())),
                names
                    .course
                    .map_or_else(|| e.course.to_string(), |c| cell(&c.name)),
                e.registered_on().format(DATE_FORMAT).to_string(),
                format!("{status_glyph} {}", e.status.label()),
            ]
        })
        .collect();
    (
        &["Student", "Course", "Registered", "Status"],
        vec![
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
        rows,
    )
}

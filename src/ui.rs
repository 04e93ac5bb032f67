use itertools::Itertools;
use ratatui::{
    layout::Margin,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use termfolio::session::StageId;

use crate::App;

const PROMPT: &str = "$ ";
const CURSOR: &str = "▌";

// The fixed terminal palette of the profile page.
const GREEN: Color = Color::Green;
const AMBER: Color = Color::Rgb(255, 181, 80);
const CYAN: Color = Color::Cyan;
const BLUE: Color = Color::Blue;
const MUTED: Color = Color::Gray;
const DIM: Color = Color::DarkGray;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area().inner(Margin::new(2, 1));
    let lines = compose_lines(app, area.width);

    let viewport = area.height as usize;
    let anchor = lines.len().saturating_sub(1);
    app.scroll
        .follow(app.session.revision(), anchor, lines.len(), viewport);
    app.remember_layout(lines.len(), viewport);

    let doc = Paragraph::new(lines).scroll((app.scroll.offset() as u16, 0));
    f.render_widget(doc, area);
}

/// Everything currently revealed, as one styled column. Pre-wrapped to
/// `width` so the scroll math sees real line counts.
pub fn compose_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let text_width = (width as usize).saturating_sub(2).max(20);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for id in StageId::ALL {
        let stage = app.session.stage(id);
        if !stage.started {
            // The cascade guarantees nothing after this stage moved either.
            break;
        }

        lines.push(prompt_line(
            stage.displayed,
            !stage.complete && app.blink_on(),
        ));
        lines.push(Line::default());

        if stage.complete {
            match id {
                StageId::Identity => identity_block(app, text_width, &mut lines),
                StageId::Projects => projects_block(app, text_width, &mut lines),
                StageId::Experience => experience_block(app, text_width, &mut lines),
                StageId::Contact => contact_block(app, &mut lines),
            }
            lines.push(Line::default());
        }
    }

    if app.session.cursor_shown() {
        let mut spans = vec![Span::styled(
            PROMPT,
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        )];
        if app.blink_on() {
            spans.push(Span::styled(CURSOR, Style::default().fg(GREEN)));
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn prompt_line(text: &str, cursor: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            PROMPT,
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::raw(text.to_string()),
    ];
    if cursor {
        spans.push(Span::styled(CURSOR, Style::default().fg(GREEN)));
    }
    Line::from(spans)
}

fn identity_block(app: &App, text_width: usize, lines: &mut Vec<Line<'static>>) {
    let profile = &app.profile;

    lines.push(Line::from(Span::styled(
        app.session.name_displayed().to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        profile.role.clone(),
        Style::default().fg(AMBER),
    )));
    lines.push(Line::from(vec![
        Span::styled(profile.location.clone(), Style::default().fg(MUTED)),
        Span::styled(" · ", Style::default().fg(DIM)),
        Span::styled(
            app.session.clock_text().to_string(),
            Style::default().fg(DIM),
        ),
    ]));
    lines.push(Line::default());

    for row in wrap(&profile.bio, text_width) {
        lines.push(Line::from(Span::styled(row, Style::default().fg(MUTED))));
    }
    for row in wrap(&profile.tech.iter().join(" · "), text_width) {
        lines.push(Line::from(Span::styled(row, Style::default().fg(DIM))));
    }
}

fn projects_block(app: &App, text_width: usize, lines: &mut Vec<Line<'static>>) {
    for (i, project) in app.profile.projects.iter().enumerate() {
        let chip = if i % 2 == 0 { AMBER } else { CYAN };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}/", project.name),
                Style::default().fg(BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(project.tag.to_uppercase(), Style::default().fg(chip)),
        ]));
        for row in wrap(&project.description, text_width) {
            lines.push(Line::from(Span::styled(row, Style::default().fg(MUTED))));
        }
        lines.push(link_line(&project.url, Some(app.link_digit(i))));
        if i + 1 < app.profile.projects.len() {
            lines.push(Line::default());
        }
    }
}

fn experience_block(app: &App, text_width: usize, lines: &mut Vec<Line<'static>>) {
    let experience = &app.profile.experience;

    let mut header = vec![Span::styled(
        experience.company.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if experience.current {
        header.push(Span::raw("  "));
        header.push(Span::styled("CURRENT", Style::default().fg(GREEN)));
    }
    lines.push(Line::from(header));
    lines.push(Line::from(Span::styled(
        experience.title.clone(),
        Style::default().fg(AMBER),
    )));
    for row in wrap(&experience.summary, text_width.saturating_sub(2)) {
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(DIM)),
            Span::styled(row, Style::default().fg(MUTED)),
        ]));
    }
    lines.push(link_line(&experience.url, None));
}

fn contact_block(app: &App, lines: &mut Vec<Line<'static>>) {
    let first_digit = app.profile.projects.len();
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (i, link) in app.profile.links.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(DIM)));
        }
        spans.push(Span::styled(
            format!("[{}] {}", app.link_digit(first_digit + i), link.label),
            Style::default().fg(MUTED),
        ));
    }
    lines.push(Line::from(spans));
    lines.push(Line::from(Span::styled(
        format!("✉ {}", app.profile.email),
        Style::default().fg(MUTED),
    )));
}

fn link_line(url: &str, digit: Option<char>) -> Line<'static> {
    let mut spans = vec![
        Span::styled("→ ", Style::default().fg(DIM)),
        Span::styled(url.to_string(), Style::default().fg(MUTED)),
    ];
    if let Some(digit) = digit {
        spans.push(Span::styled(
            format!("  [{}]", digit),
            Style::default().fg(DIM),
        ));
    }
    Line::from(spans)
}

/// Greedy word wrap on display width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

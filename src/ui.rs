use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use typepace::{game::Game, session::FinishReason, CharacterState, Outcome, Status, TypingSession};

use crate::{App, Mode};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const LEGEND: &str = "(esc)ape / (ctrl+r) restart";

/// Style of one reference character, with the cursor position singled out
#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Typed,
    Cursor,
    Missed,
    Ahead,
}

fn cell_style(cell: Cell) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match cell {
        Cell::Typed => bold.fg(Color::Green),
        // a rejected key marks the character still expected
        Cell::Missed => bold.fg(Color::Red).add_modifier(Modifier::UNDERLINED),
        Cell::Cursor => bold
            .add_modifier(Modifier::DIM)
            .add_modifier(Modifier::UNDERLINED),
        Cell::Ahead => bold.add_modifier(Modifier::DIM),
    }
}

fn prompt_spans(session: &TypingSession, last_outcome: Option<Outcome>) -> Vec<Span<'static>> {
    let cursor = session.input().len();
    let rejected = last_outcome == Some(Outcome::Incorrect);

    session
        .reference()
        .iter()
        .zip(session.character_states())
        .enumerate()
        .map(|(idx, (&c, state))| {
            let cell = match state {
                CharacterState::Correct => Cell::Typed,
                CharacterState::Incorrect => Cell::Missed,
                CharacterState::Pending if idx == cursor && rejected => Cell::Missed,
                CharacterState::Pending if idx == cursor => Cell::Cursor,
                CharacterState::Pending => Cell::Ahead,
            };
            (cell, c)
        })
        .chunk_by(|(cell, _)| *cell)
        .into_iter()
        .map(|(cell, run)| Span::styled(run.map(|(_, c)| c).collect::<String>(), cell_style(cell)))
        .collect()
}

fn stats_line(session: &TypingSession, seconds_remaining: Option<u64>) -> String {
    let metrics = session.metrics();
    let errors = session.state().error_count;
    match seconds_remaining {
        Some(secs) => format!(
            "{secs}s   {} wpm   {}% acc   {errors} errors",
            metrics.wpm, metrics.accuracy
        ),
        None => format!(
            "{} wpm   {}% acc   {errors} errors",
            metrics.wpm, metrics.accuracy
        ),
    }
}

/// Lines the prompt needs when wrapped to `width`
fn prompt_height(prompt: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    prompt.width().div_ceil(width).max(1) as u16
}

/// `prompt` is shown dimmed until the session starts
fn render_typing(
    header: String,
    prompt: &str,
    session: &TypingSession,
    seconds_remaining: Option<u64>,
    last_outcome: Option<Outcome>,
    area: Rect,
    buf: &mut Buffer,
) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let prompt_lines = prompt_height(prompt, max_chars_per_line);
    let padding = area.height.saturating_sub(prompt_lines + 4) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(padding),
            Constraint::Length(2),
            Constraint::Length(prompt_lines),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(header, bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let stats = if session.status() == Status::Idle {
        Span::styled(
            "start typing to begin",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )
    } else {
        Span::styled(stats_line(session, seconds_remaining), dim_bold_style)
    };
    Paragraph::new(stats)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let spans = if session.status() == Status::Idle {
        vec![Span::styled(prompt.to_string(), dim_bold_style)]
    } else {
        prompt_spans(session, last_outcome)
    };
    Paragraph::new(Line::from(spans))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(LEGEND, italic_style)).render(chunks[5], buf);
}

fn render_results(title: String, lines: Vec<String>, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let body_height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(body_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(title, bold_style.fg(Color::Magenta)))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let body: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, bold_style)))
        .collect();
    Paragraph::new(body)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(LEGEND, italic_style)).render(chunks[4], buf);
}

fn practice_results(session: &TypingSession) -> (String, Vec<String>) {
    let title = match session.finish_reason() {
        Some(FinishReason::TimeExpired) => "time's up",
        _ => "done",
    };
    let metrics = session.metrics();
    let state = session.state();
    (
        title.to_string(),
        vec![
            format!("{} wpm   {}% acc", metrics.wpm, metrics.accuracy),
            format!(
                "{} errors   {:.1}s",
                state.error_count,
                session.elapsed().as_secs_f64()
            ),
        ],
    )
}

fn game_results(game: &Game) -> (String, Vec<String>) {
    let summary = game.summary();
    let mut lines = vec![
        format!("score {}", summary.score),
        format!(
            "{} rounds   {} perfect",
            summary.rounds_completed, summary.perfect_rounds
        ),
        format!("{} wpm   {}% acc", summary.wpm, summary.accuracy),
    ];
    if summary.explosions > 0 {
        lines.push(format!("{} explosions", summary.explosions));
    }
    (format!("{} over", game.kind().title()), lines)
}

fn game_header(game: &Game) -> String {
    let mut header = format!(
        "{} ({})   score {}   streak {}",
        game.kind().title(),
        game.difficulty(),
        game.score(),
        game.streak()
    );
    if let Some(theme) = game.theme() {
        header.push_str(&format!("   theme {theme}"));
    }
    if let Some(last) = game.last_round() {
        header.push_str(&format!("   +{}", last.points));
    }
    header
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.mode {
            Mode::Practice { session, .. } if session.status() == Status::Finished => {
                let (title, lines) = practice_results(session);
                render_results(title, lines, area, buf);
            }
            Mode::Practice {
                session, prompt, ..
            } => render_typing(
                "practice".to_string(),
                prompt,
                session,
                session.seconds_remaining(),
                self.last_outcome,
                area,
                buf,
            ),
            Mode::Game(game) if game.is_over() => {
                let (title, lines) = game_results(game);
                render_results(title, lines, area, buf);
            }
            Mode::Game(game) => render_typing(
                game_header(game),
                game.current_text(),
                game.session(),
                game.seconds_remaining(),
                self.last_outcome,
                area,
                buf,
            ),
        }
    }
}

//! All drawing. Screens are pure views over `App`: they read the
//! controller, the active screen's counters and the room scripts, and
//! render exactly one full-screen view per frame.

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::game::{RoomId, RoomScreen};
use crate::script::RoomScript;
use crate::{ActiveScreen, App};

/// The four "mad" times the broken clock cycles through.
const MAD_TIMES: [&str; 4] = ["03:33", "01:11", "02:22", "04:44"];
const CLOCK_CYCLE: Duration = Duration::from_secs(2);

/// The seventh body bag twitches for one second out of every four.
const BAG_INTERVAL_MS: u128 = 4000;
const BAG_MOVING_MS: u128 = 1000;

pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    match &app.screen {
        ActiveScreen::Intro(_) => draw_intro(f, app),
        ActiveScreen::Room(room) => draw_room(f, app, room, now),
        ActiveScreen::Ending(_) => draw_ending(f, app, now),
    }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn blood() -> Style {
    Style::default().fg(Color::Red)
}

// ── Intro ──

fn draw_intro(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(1),
        ])
        .split(f.area());

    let title = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("T O U R   A R C A D E   p r e s e n t s", blood()),
        Line::raw(""),
        Line::styled(
            "T H E   A S Y L U M   O F   E C H O E S",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("\"You were never meant to leave.", dim()),
        Line::styled(" You were only meant to remember.\"", dim()),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let story = Paragraph::new(vec![
        Line::raw("You wake up inside an abandoned asylum."),
        Line::raw("The halls whisper."),
        Line::raw("The rooms change."),
        Line::raw("Your own thoughts start to feel... unreliable."),
        Line::raw(""),
        Line::styled("There are 6 sealed rooms.", blood()),
        Line::styled("Each one damages your sense of reality.", blood()),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    f.render_widget(story, chunks[1]);

    let committed = match &app.screen {
        ActiveScreen::Intro(intro) => intro.committed(),
        _ => None,
    };

    if let Some(name) = committed {
        let opening = Paragraph::new(vec![
            Line::styled(
                "Opening the doors...",
                blood().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw(format!("Welcome, {name}.")),
            Line::styled("We've been expecting you.", dim()),
        ])
        .alignment(Alignment::Center);
        f.render_widget(opening, chunks[2]);
    } else {
        let field = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(44),
                Constraint::Min(1),
            ])
            .split(chunks[2]);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(field[1]);

        let label = Paragraph::new("Enter your name... if you dare")
            .alignment(Alignment::Center)
            .style(dim());
        f.render_widget(label, rows[0]);
        f.render_widget(&app.editor, rows[1]);
        let button = Paragraph::new("[ ENTER THE ASYLUM ]")
            .alignment(Alignment::Center)
            .style(if app.input_line().trim().is_empty() {
                dim()
            } else {
                Style::default().fg(Color::Black).bg(Color::Red)
            });
        f.render_widget(button, rows[2]);
    }

    let warning = Paragraph::new("! NOT RECOMMENDED FOR THOSE WITH WEAK MINDS !")
        .alignment(Alignment::Center)
        .style(dim());
    f.render_widget(warning, chunks[3]);
}

// ── Rooms ──

fn draw_room(f: &mut Frame, app: &App, room: &RoomScreen, now: Instant) {
    let script = app.script_for(room.room);
    let hint_rows = visible_hint_lines(script, room).len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(hint_rows.max(1) + 1),
            Constraint::Length(5),
        ])
        .split(f.area());

    draw_status_bar(f, app, script, chunks[0]);
    draw_room_body(f, app, room, script, now, chunks[1]);
    draw_hints(f, script, room, chunks[2]);

    if room.room.is_choice() {
        draw_choice_buttons(f, app, room, script, chunks[3]);
    } else {
        draw_answer_field(f, app, room, script, now, chunks[3]);
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, script: &RoomScript, area: Rect) {
    let status = Line::from(vec![
        Span::styled(
            " ASYLUM OF ECHOES ",
            Style::default().fg(Color::Black).bg(Color::Red),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Room {}/6 ", script.meta.room_number),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(format!(" {} ", script.meta.title), blood()),
        Span::raw("  "),
        Span::styled(format!("Theme: {}", script.meta.theme), dim()),
        Span::raw("  "),
        Span::styled(
            format!(" Patient: {} ", app.game.player_name()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    let bar = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(bar, area);
}

fn draw_room_body(
    f: &mut Frame,
    app: &App,
    room: &RoomScreen,
    script: &RoomScript,
    now: Instant,
    area: Rect,
) {
    let mut text = fill_placeholders(&script.narrative.body, app, room);

    // Staged reveal: append each unlocked block in order.
    let step = room.reveal_step(now);
    for stage in script.narrative.stages.iter().take(step) {
        text.push('\n');
        text.push_str(stage);
    }

    match room.room {
        RoomId::Morgue => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(area);
            render_body_panel(f, text, halves[0]);
            draw_body_bags(f, room, now, halves[1]);
        }
        RoomId::Clock => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(5)])
                .split(area);
            draw_clock_face(f, room, now, rows[0]);
            render_body_panel(f, text, rows[1]);
        }
        _ => render_body_panel(f, text, area),
    }
}

fn render_body_panel(f: &mut Frame, text: String, area: Rect) {
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" The Room "))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    f.render_widget(panel, area);
}

/// Seven tagged bags; the last one twitches on a fixed cycle. Pure
/// misdirection, no effect on the count that opens the door.
fn draw_body_bags(f: &mut Frame, room: &RoomScreen, now: Instant, area: Rect) {
    let elapsed = now.saturating_duration_since(room.entered).as_millis();
    let moving = elapsed >= BAG_INTERVAL_MS && elapsed % BAG_INTERVAL_MS < BAG_MOVING_MS;

    let mut lines: Vec<Line> = vec![Line::raw("")];
    for row in 0..2 {
        let bags: Vec<usize> = (1..=7).filter(|n| (n - 1) / 4 == row).collect();
        let mut tops = String::new();
        let mut mids = String::new();
        let mut bots = String::new();
        for n in &bags {
            let twitch = *n == 7 && moving;
            tops.push_str("  ______ ");
            mids.push_str(&format!(" | #{n} {} |", if twitch { "!" } else { " " }));
            bots.push_str(if twitch { " |_~__~_|" } else { " |______|" });
        }
        lines.push(Line::raw(tops));
        lines.push(Line::styled(
            mids,
            if moving && bags.contains(&7) {
                blood()
            } else {
                Style::default().fg(Color::Gray)
            },
        ));
        lines.push(Line::raw(bots));
        lines.push(Line::raw(""));
    }
    let hall = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" The Hallway "))
        .alignment(Alignment::Center);
    f.render_widget(hall, area);
}

fn draw_clock_face(f: &mut Frame, room: &RoomScreen, now: Instant, area: Rect) {
    let elapsed = now.saturating_duration_since(room.entered);
    let idx = (elapsed.as_millis() / CLOCK_CYCLE.as_millis()) as usize % MAD_TIMES.len();
    let face = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            format!("[  {}  ]", MAD_TIMES[idx]),
            blood().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" The Clock "));
    f.render_widget(face, area);
}

fn visible_hint_lines<'a>(script: &'a RoomScript, room: &RoomScreen) -> Vec<&'a str> {
    script
        .narrative
        .visible_hints(room.attempts())
        .flat_map(|tier| tier.text.trim_matches('\n').lines())
        .collect()
}

fn draw_hints(f: &mut Frame, script: &RoomScript, room: &RoomScreen, area: Rect) {
    let lines: Vec<Line> = visible_hint_lines(script, room)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            // first tier reads as the failure line, the rest as whispers
            if i == 0 {
                Line::styled(text.to_string(), blood().add_modifier(Modifier::BOLD))
            } else {
                Line::styled(text.to_string(), Style::default().fg(Color::Gray))
            }
        })
        .collect();
    let hints = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(hints, area);
}

fn draw_answer_field(
    f: &mut Frame,
    app: &App,
    room: &RoomScreen,
    script: &RoomScript,
    now: Instant,
    area: Rect,
) {
    // The final room holds its question back until the reveal is done.
    if room.reveal_step(now) < 3 {
        let waiting = Paragraph::new("...")
            .alignment(Alignment::Center)
            .style(dim());
        f.render_widget(waiting, area);
        return;
    }

    let field = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(46),
            Constraint::Min(1),
        ])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .split(field[1]);

    let prompt = Paragraph::new(script.narrative.prompt.trim_matches('\n'))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(prompt, rows[0]);
    f.render_widget(&app.editor, rows[1]);
}

fn draw_choice_buttons(
    f: &mut Frame,
    app: &App,
    room: &RoomScreen,
    script: &RoomScript,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .split(area);

    let prompt = Paragraph::new(script.narrative.prompt.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(prompt, rows[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(12),
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Min(1),
        ])
        .split(rows[1]);

    for (pick, slot) in [(6u8, buttons[1]), (7u8, buttons[3])] {
        let style = match room.selected() {
            Some(sel) if sel == pick => {
                // lit while the pick resolves: green for the truth,
                // red for the lie
                if pick == 7 {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::White).bg(Color::Red)
                }
            }
            Some(_) => dim(),
            None if app.choice_cursor == pick => Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(Color::White),
        };
        let button = Paragraph::new(pick.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, slot);
    }
}

// ── Ending ──

fn draw_ending(f: &mut Frame, app: &App, now: Instant) {
    let revealed = match &app.screen {
        ActiveScreen::Ending(ending) => ending.revealed(now),
        _ => false,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(6),
        ])
        .split(f.area());

    let headline = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            "YOU ESCAPE...",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("OR DO YOU?", blood().add_modifier(Modifier::BOLD)),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let doors = Paragraph::new(vec![
        Line::raw("The doors open."),
        Line::raw("But the whispers follow you."),
        Line::styled("Because the asylum didn't want answers.", blood()),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    f.render_widget(doors, chunks[1]);

    let revelation = Paragraph::new("It wanted your fear.")
        .alignment(Alignment::Center)
        .style(blood().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(revelation, chunks[2]);

    if revealed {
        let closing = Paragraph::new(vec![
            Line::styled("Players don't just solve puzzles --", dim()),
            Line::styled("they doubt themselves.", dim()),
            Line::raw(""),
            Line::raw(format!(
                "Thank you for playing, {}.",
                app.game.player_name()
            )),
            Line::styled("The asylum will remember you.", dim()),
            Line::raw(""),
            Line::styled(
                "[ PLAY AGAIN (Enter) ]",
                Style::default().fg(Color::Black).bg(Color::Gray),
            ),
        ])
        .alignment(Alignment::Center);
        f.render_widget(closing, chunks[3]);
    }
}

// ── Placeholder interpolation ──

/// Fill `{name}`, `{patient_id}` and `{answers}` in script text.
pub fn fill_placeholders(text: &str, app: &App, room: &RoomScreen) -> String {
    let mut out = text.replace("{name}", app.game.player_name());
    out = out.replace("{patient_id}", &room.patient_id.to_string());
    if out.contains("{answers}") {
        let answers = app
            .game
            .answers()
            .iter()
            .map(|a| format!("  > {a}"))
            .collect::<Vec<_>>()
            .join("\n");
        out = out.replace("{answers}", &answers);
    }
    out
}

mod game;
mod script;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::Style,
    widgets::{Block, Borders},
    Terminal,
};
use tui_textarea::TextArea;

use game::screens::NAME_LIMIT;
use game::{EndingScreen, Game, IntroScreen, RoomId, RoomScreen, Screen, Submission};
use script::RoomScript;

/// Poll timeout; also the cadence of pacing/animation ticks.
const TICK: Duration = Duration::from_millis(50);

/// Runtime state of whichever screen is mounted. Swapping the variant
/// drops the old screen and every pending deadline inside it.
pub enum ActiveScreen {
    Intro(IntroScreen),
    Room(RoomScreen),
    Ending(EndingScreen),
}

pub struct App<'a> {
    pub game: Game,
    pub screen: ActiveScreen,
    pub scripts: Vec<RoomScript>,
    pub editor: TextArea<'a>,
    /// Morgue button the arrow keys are resting on.
    pub choice_cursor: u8,
    input_limit: Option<usize>,
    should_quit: bool,
}

impl<'a> App<'a> {
    fn new(scripts: Vec<RoomScript>) -> Self {
        let mut app = App {
            game: Game::new(),
            screen: ActiveScreen::Intro(IntroScreen::new()),
            scripts,
            editor: TextArea::default(),
            choice_cursor: 6,
            input_limit: None,
            should_quit: false,
        };
        app.mount_intro();
        app
    }

    pub fn script_for(&self, room: RoomId) -> &RoomScript {
        &self.scripts[room.number() - 1]
    }

    /// The single line in the answer field.
    pub fn input_line(&self) -> String {
        self.editor.lines().join("")
    }

    fn make_editor(placeholder: &str, title: &str) -> TextArea<'a> {
        let mut editor = TextArea::default();
        editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
        editor.set_placeholder_text(placeholder.to_string());
        editor.set_cursor_line_style(Style::default());
        editor
    }

    fn clear_editor(&mut self) {
        self.editor.select_all();
        self.editor.cut();
    }

    fn mount_intro(&mut self) {
        self.screen = ActiveScreen::Intro(IntroScreen::new());
        self.editor = Self::make_editor(
            "Patient Name",
            " Your Name [Enter: Confirm | Esc: Quit] ",
        );
        self.input_limit = Some(NAME_LIMIT);
    }

    fn mount_room(&mut self, room: RoomId, now: Instant) {
        let placeholder = self.script_for(room).narrative.placeholder.clone();
        self.screen = ActiveScreen::Room(RoomScreen::new(room, now));
        self.editor =
            Self::make_editor(&placeholder, " Answer [Enter: Submit | Esc: Quit] ");
        // the clock takes HH:MM, nothing longer
        self.input_limit = (room == RoomId::Clock).then_some(5);
        self.choice_cursor = 6;
    }

    /// Mount whatever screen the controller says is current.
    fn sync_screen(&mut self, now: Instant) {
        match self.game.screen() {
            Screen::Intro => self.mount_intro(),
            Screen::Room(room) => self.mount_room(room, now),
            Screen::Ending => self.screen = ActiveScreen::Ending(EndingScreen::new(now)),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        let line = self.input_line();
        let cursor = self.choice_cursor;
        let mut completed: Option<(RoomId, String)> = None;
        let mut clear_input = false;
        let mut restart = false;
        let mut feed = false;

        match &mut self.screen {
            ActiveScreen::Intro(intro) => {
                // committed: the doors are opening, edits are over
                if intro.committed().is_some() {
                } else if key.code == KeyCode::Enter {
                    intro.submit(&line, now);
                } else {
                    feed = true;
                }
            }
            ActiveScreen::Room(room) if room.room.is_choice() => match key.code {
                KeyCode::Char('6') => room.choose(6, now),
                KeyCode::Char('7') => room.choose(7, now),
                KeyCode::Left => self.choice_cursor = 6,
                KeyCode::Right => self.choice_cursor = 7,
                KeyCode::Enter => room.choose(cursor, now),
                _ => {}
            },
            ActiveScreen::Room(room) => {
                if key.code == KeyCode::Enter {
                    match room.submit_text(&line, now) {
                        Submission::Accepted(canonical) => {
                            completed = Some((room.room, canonical));
                        }
                        Submission::Rejected => clear_input = true,
                        Submission::Ignored => {}
                    }
                } else {
                    feed = true;
                }
            }
            ActiveScreen::Ending(ending) => {
                if key.code == KeyCode::Enter && ending.revealed(now) {
                    restart = true;
                }
            }
        }

        if feed {
            self.feed_editor(key, &line);
        } else if let Some((room, canonical)) = completed {
            self.game.complete_room(room, canonical);
            self.sync_screen(now);
        } else if clear_input {
            self.clear_editor();
        } else if restart {
            self.game.restart();
            self.sync_screen(now);
        }
    }

    fn feed_editor(&mut self, key: KeyEvent, line: &str) {
        if key.code == KeyCode::Tab {
            return;
        }
        if let KeyCode::Char(_) = key.code {
            if let Some(limit) = self.input_limit {
                if line.chars().count() >= limit {
                    return;
                }
            }
        }
        self.editor.input(key);
    }

    /// Resolve due pacing deadlines and advance the controller.
    fn tick(&mut self, now: Instant) {
        let mut started: Option<String> = None;
        let mut completed: Option<(RoomId, String)> = None;

        match &mut self.screen {
            ActiveScreen::Intro(intro) => started = intro.tick(now),
            ActiveScreen::Room(room) => {
                if let Some(canonical) = room.tick(now) {
                    completed = Some((room.room, canonical));
                }
            }
            ActiveScreen::Ending(_) => {}
        }

        if let Some(name) = started {
            self.game.start(&name);
            self.sync_screen(now);
        } else if let Some((room, canonical)) = completed {
            self.game.complete_room(room, canonical);
            self.sync_screen(now);
        }
    }
}

fn main() -> Result<()> {
    let scripts = script::load_wing(Path::new("rooms"))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(scripts);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result?;

    println!();
    println!("The asylum will remember you.");
    println!();
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| ui::draw(f, app, now))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, Instant::now());
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

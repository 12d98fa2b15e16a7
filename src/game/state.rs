use super::rooms::RoomId;

/// Which full-screen view is active. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Room(RoomId),
    Ending,
}

/// The root of all cross-room state: the active screen, the patient's
/// name, and every canonical answer collected so far. Screens never
/// touch each other's state; they report upward through the methods
/// below and this controller swaps the screen.
#[derive(Debug)]
pub struct Game {
    screen: Screen,
    player_name: String,
    answers: Vec<String>,
}

impl Game {
    pub fn new() -> Self {
        Game {
            screen: Screen::Intro,
            player_name: String::new(),
            answers: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Admit the patient and open the first room. Only legal from the
    /// intro screen with a non-empty (trimmed) name; anything else is
    /// a wiring bug.
    pub fn start(&mut self, name: &str) {
        assert_eq!(self.screen, Screen::Intro, "start() outside the intro");
        let name = name.trim();
        assert!(!name.is_empty(), "start() with an empty name");
        self.player_name = name.to_string();
        self.answers.clear();
        self.screen = Screen::Room(RoomId::FIRST);
    }

    /// Record a solved room and open the next door (or the ending
    /// after the sixth). `room` must be the room currently on screen.
    pub fn complete_room(&mut self, room: RoomId, canonical: String) {
        assert_eq!(
            self.screen,
            Screen::Room(room),
            "complete_room() for a room that is not current"
        );
        self.answers.push(canonical);
        self.screen = match room.next() {
            Some(next) => Screen::Room(next),
            None => Screen::Ending,
        };
    }

    /// Back to the intro with everything wiped. Reached from the
    /// ending screen's Play Again, but a full reset is safe from any
    /// state.
    pub fn restart(&mut self) {
        *self = Game::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rooms::validate;

    #[test]
    fn starts_at_intro_with_nothing() {
        let game = Game::new();
        assert_eq!(game.screen(), Screen::Intro);
        assert_eq!(game.player_name(), "");
        assert!(game.answers().is_empty());
    }

    #[test]
    fn start_trims_name_and_opens_room_one() {
        let mut game = Game::new();
        game.start("  mara  ");
        assert_eq!(game.player_name(), "mara");
        assert_eq!(game.screen(), Screen::Room(RoomId::Admission));
    }

    #[test]
    #[should_panic(expected = "empty name")]
    fn start_rejects_blank_names() {
        Game::new().start("   ");
    }

    #[test]
    #[should_panic(expected = "not current")]
    fn completing_the_wrong_room_is_a_bug() {
        let mut game = Game::new();
        game.start("mara");
        game.complete_room(RoomId::Clock, "12:34".into());
    }

    #[test]
    #[should_panic(expected = "outside the intro")]
    fn starting_twice_is_a_bug() {
        let mut game = Game::new();
        game.start("mara");
        game.start("mara");
    }

    #[test]
    fn rooms_advance_strictly_forward() {
        let mut game = Game::new();
        game.start("mara");
        let answers = ["VOID", "EIGHT", "SILENCE", "7", "12:34", "TOMBS"];
        for (i, (room, answer)) in RoomId::ALL.iter().zip(answers).enumerate() {
            assert_eq!(game.screen(), Screen::Room(*room));
            game.complete_room(*room, answer.to_string());
            assert_eq!(game.answers().len(), i + 1);
        }
        assert_eq!(game.screen(), Screen::Ending);
        let got: Vec<&str> = game.answers().iter().map(String::as_str).collect();
        assert_eq!(got, answers);
    }

    #[test]
    fn full_playthrough_via_validators() {
        let mut game = Game::new();
        game.start("mara");
        let typed = ["void", " eight", "Silence", "7", "12:34", "tombs "];
        for (room, raw) in RoomId::ALL.iter().zip(typed) {
            let verdict = validate(*room, raw);
            assert!(verdict.accepted);
            game.complete_room(*room, verdict.canonical);
        }
        assert_eq!(game.screen(), Screen::Ending);
        let got: Vec<&str> = game.answers().iter().map(String::as_str).collect();
        assert_eq!(got, ["VOID", "EIGHT", "SILENCE", "7", "12:34", "TOMBS"]);
    }

    #[test]
    fn restart_wipes_everything() {
        let mut game = Game::new();
        game.start("mara");
        game.complete_room(RoomId::Admission, "VOID".into());
        game.restart();
        assert_eq!(game.screen(), Screen::Intro);
        assert_eq!(game.player_name(), "");
        assert!(game.answers().is_empty());
    }

    #[test]
    fn restart_is_safe_mid_run() {
        let mut game = Game::new();
        game.restart();
        assert_eq!(game.screen(), Screen::Intro);
        game.start("mara");
        game.restart();
        assert_eq!(game.screen(), Screen::Intro);
    }
}

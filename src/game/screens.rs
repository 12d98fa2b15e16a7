//! Runtime state for the screen currently on display: attempt
//! counters, input commitment, and the pacing deadlines that stand in
//! for the original game's one-shot timers. A screen's deadlines live
//! inside its value, so swapping screens drops every pending timer
//! with it; nothing can fire against a screen that is gone.

use std::time::{Duration, Instant};

use rand::Rng;

use super::rooms::{validate, RoomId};

/// Max length of the patient name, counted after trimming.
pub const NAME_LIMIT: usize = 20;

/// Pause between confirming a name and the doors actually opening.
pub const START_DELAY: Duration = Duration::from_secs(3);

/// Morgue: how long a correct pick lingers before the room completes.
pub const MORGUE_ACCEPT_DELAY: Duration = Duration::from_millis(1000);

/// Morgue: how long a wrong pick stays lit before the choice resets.
pub const MORGUE_RESET_DELAY: Duration = Duration::from_millis(1500);

/// Mind room: elapsed time at which reveal steps 1, 2 and 3 unlock.
pub const MIND_STEP_AT: [Duration; 3] = [
    Duration::from_secs(4),
    Duration::from_secs(9),
    Duration::from_secs(13),
];

/// Ending: delay before the closing text and Play Again appear.
pub const ENDING_REVEAL_DELAY: Duration = Duration::from_secs(5);

/// Outcome of pushing an answer at a room.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Correct; carries the canonical answer for the controller.
    Accepted(String),
    /// Wrong; the attempt was counted and the field should clear.
    Rejected,
    /// The room is not taking input right now (already solved, choice
    /// pending, or the reveal has not reached the question yet).
    Ignored,
}

/// The name-entry screen. Once the name is confirmed the screen is
/// committed: edits stop and `start` fires after a fixed pause.
pub struct IntroScreen {
    pending: Option<(String, Instant)>,
}

impl IntroScreen {
    pub fn new() -> Self {
        IntroScreen { pending: None }
    }

    /// Name the player committed to, if the doors are opening.
    pub fn committed(&self) -> Option<&str> {
        self.pending.as_ref().map(|(name, _)| name.as_str())
    }

    /// Confirm the name. Empty (after trim) does nothing; so does a
    /// second confirm while the first is pending.
    pub fn submit(&mut self, name: &str, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let name: String = name.trim().chars().take(NAME_LIMIT).collect();
        if name.is_empty() {
            return false;
        }
        self.pending = Some((name, now + START_DELAY));
        true
    }

    /// Yields the name exactly once, when the start delay has run out.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now >= *at => self.pending.take().map(|(name, _)| name),
            _ => None,
        }
    }
}

/// Interaction mode of a room: free text, or the morgue's two buttons.
enum RoomInput {
    Text,
    Choice {
        selected: Option<u8>,
        resolve_at: Option<Instant>,
    },
}

/// One mounted room: its attempt counter, its input state, and the
/// moment it was entered (the reference point for staged reveals and
/// decorative motion). Discarded wholesale when the room is solved.
pub struct RoomScreen {
    pub room: RoomId,
    pub entered: Instant,
    /// Shown on the admission form only; cosmetic.
    pub patient_id: u32,
    attempts: u32,
    input: RoomInput,
    done: bool,
}

impl RoomScreen {
    pub fn new(room: RoomId, now: Instant) -> Self {
        let input = if room.is_choice() {
            RoomInput::Choice {
                selected: None,
                resolve_at: None,
            }
        } else {
            RoomInput::Text
        };
        RoomScreen {
            room,
            entered: now,
            patient_id: rand::thread_rng().gen_range(1000..10000),
            attempts: 0,
            input,
            done: false,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Currently lit morgue button, if any.
    pub fn selected(&self) -> Option<u8> {
        match self.input {
            RoomInput::Choice { selected, .. } => selected,
            RoomInput::Text => None,
        }
    }

    /// How far the Mind room's staged narrative has advanced (0..=3).
    /// Monotone in elapsed time; other rooms are always fully shown.
    pub fn reveal_step(&self, now: Instant) -> usize {
        if self.room != RoomId::Mind {
            return MIND_STEP_AT.len();
        }
        let elapsed = now.saturating_duration_since(self.entered);
        MIND_STEP_AT.iter().filter(|at| elapsed >= **at).count()
    }

    fn taking_input(&self, now: Instant) -> bool {
        !self.done && self.reveal_step(now) == MIND_STEP_AT.len()
    }

    /// Free-text submission (Enter or the submit action).
    pub fn submit_text(&mut self, raw: &str, now: Instant) -> Submission {
        if matches!(self.input, RoomInput::Choice { .. }) || !self.taking_input(now) {
            return Submission::Ignored;
        }
        let verdict = validate(self.room, raw);
        if verdict.accepted {
            self.done = true;
            Submission::Accepted(verdict.canonical)
        } else {
            self.attempts += 1;
            Submission::Rejected
        }
    }

    /// Morgue button press. Locks the choice until it resolves.
    pub fn choose(&mut self, pick: u8, now: Instant) {
        if self.done {
            return;
        }
        if let RoomInput::Choice {
            selected,
            resolve_at,
        } = &mut self.input
        {
            if selected.is_none() && (pick == 6 || pick == 7) {
                let delay = if validate(self.room, &pick.to_string()).accepted {
                    MORGUE_ACCEPT_DELAY
                } else {
                    MORGUE_RESET_DELAY
                };
                *selected = Some(pick);
                *resolve_at = Some(now + delay);
            }
        }
    }

    /// Resolve any due deadline. Returns the canonical answer exactly
    /// once, when a correct morgue pick has finished lingering.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        if self.done {
            return None;
        }
        if let RoomInput::Choice {
            selected,
            resolve_at,
        } = &mut self.input
        {
            if let Some(at) = *resolve_at {
                if now >= at {
                    *resolve_at = None;
                    let pick = selected.take().unwrap_or(0);
                    let verdict = validate(self.room, &pick.to_string());
                    if verdict.accepted {
                        self.done = true;
                        return Some(verdict.canonical);
                    }
                    self.attempts += 1;
                }
            }
        }
        None
    }
}

/// The final screen: a sink for the player's name, with a staged
/// closing reveal and a restart trigger once it has played out.
pub struct EndingScreen {
    entered: Instant,
}

impl EndingScreen {
    pub fn new(now: Instant) -> Self {
        EndingScreen { entered: now }
    }

    pub fn revealed(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.entered) >= ENDING_REVEAL_DELAY
    }
}

/// The six sealed rooms, in the order the asylum opens them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomId {
    /// Room 1 — the admission form (hidden diagnosis).
    Admission,
    /// Room 2 — the medicine cabinet (count what remains).
    Medicine,
    /// Room 3 — the empty bed (missing memory).
    Registry,
    /// Room 4 — the counting corpses (misdirection).
    Morgue,
    /// Room 5 — the broken clock (time distortion).
    Clock,
    /// Room 6 — your mind (psychological collapse).
    Mind,
}

impl RoomId {
    pub const ALL: [RoomId; 6] = [
        RoomId::Admission,
        RoomId::Medicine,
        RoomId::Registry,
        RoomId::Morgue,
        RoomId::Clock,
        RoomId::Mind,
    ];

    pub const FIRST: RoomId = RoomId::Admission;

    /// 1-based room number as shown to the player.
    pub fn number(self) -> usize {
        match self {
            RoomId::Admission => 1,
            RoomId::Medicine => 2,
            RoomId::Registry => 3,
            RoomId::Morgue => 4,
            RoomId::Clock => 5,
            RoomId::Mind => 6,
        }
    }

    /// The room behind the next door, or `None` after the sixth.
    pub fn next(self) -> Option<RoomId> {
        match self {
            RoomId::Admission => Some(RoomId::Medicine),
            RoomId::Medicine => Some(RoomId::Registry),
            RoomId::Registry => Some(RoomId::Morgue),
            RoomId::Morgue => Some(RoomId::Clock),
            RoomId::Clock => Some(RoomId::Mind),
            RoomId::Mind => None,
        }
    }

    /// True for the one room answered with a two-button choice
    /// instead of free text.
    pub fn is_choice(self) -> bool {
        matches!(self, RoomId::Morgue)
    }
}

#[derive(Debug)]
pub struct Verdict {
    pub accepted: bool,
    /// Normalized form of the input; on success this is exactly the
    /// string the controller records.
    pub canonical: String,
}

fn solution(room: RoomId) -> &'static str {
    match room {
        // V-ertigo, O-bsession, I-nsomnia, D-elusion
        RoomId::Admission => "VOID",
        // 3 + 2 + 1 + 2 pills, written as a word
        RoomId::Medicine => "EIGHT",
        // the name that was never written
        RoomId::Registry => "SILENCE",
        // all seven bags hold the dead, moving or not
        RoomId::Morgue => "7",
        // the one time whose digits do not repeat
        RoomId::Clock => "12:34",
        // B W S M T rearranged
        RoomId::Mind => "TOMBS",
    }
}

/// Check a raw submission against a room's solution.
///
/// Every room trims and uppercases before comparing, except the broken
/// clock: its answer is digits and a colon, compared literally so that
/// only the exact `12:34` opens the door.
pub fn validate(room: RoomId, raw: &str) -> Verdict {
    let canonical = match room {
        RoomId::Clock => raw.trim().to_string(),
        _ => raw.trim().to_uppercase(),
    };
    Verdict {
        accepted: canonical == solution(room),
        canonical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_room_accepts_only_its_solution() {
        let good = ["void", "eight", "silence", "7", "12:34", "tombs"];
        for (room, answer) in RoomId::ALL.iter().zip(good) {
            let verdict = validate(*room, answer);
            assert!(verdict.accepted, "{room:?} rejected {answer}");
            // wrong room, same answer
            for other in RoomId::ALL.iter().filter(|r| **r != *room) {
                assert!(!validate(*other, answer).accepted);
            }
        }
    }

    #[test]
    fn normalization_trims_and_uppercases() {
        let verdict = validate(RoomId::Admission, "  void \n");
        assert!(verdict.accepted);
        assert_eq!(verdict.canonical, "VOID");

        let verdict = validate(RoomId::Registry, "Silence");
        assert!(verdict.accepted);
        assert_eq!(verdict.canonical, "SILENCE");
    }

    #[test]
    fn medicine_wants_the_word_not_the_digit() {
        assert!(!validate(RoomId::Medicine, "8").accepted);
        assert!(validate(RoomId::Medicine, "eight").accepted);
    }

    #[test]
    fn clock_is_literal() {
        assert!(validate(RoomId::Clock, " 12:34 ").accepted);
        assert!(!validate(RoomId::Clock, "12:35").accepted);
        assert!(!validate(RoomId::Clock, "1234").accepted);
    }

    #[test]
    fn morgue_counts_all_seven() {
        assert!(validate(RoomId::Morgue, "7").accepted);
        assert!(!validate(RoomId::Morgue, "6").accepted);
    }

    #[test]
    fn room_order_is_fixed() {
        let mut room = RoomId::FIRST;
        for n in 1..=6 {
            assert_eq!(room.number(), n);
            match room.next() {
                Some(next) => room = next,
                None => assert_eq!(n, 6),
            }
        }
    }
}

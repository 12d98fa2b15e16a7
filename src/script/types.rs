use serde::Deserialize;

/// Presentation script for one room: titles, body copy, the question,
/// and the hint ladder. Answers are not in here; they live with the
/// validators. Body text may carry `{name}`, `{patient_id}` and
/// `{answers}` placeholders filled at render time.
#[derive(Debug, Deserialize)]
pub struct RoomScript {
    pub meta: RoomMeta,
    pub narrative: Narrative,
}

#[derive(Debug, Deserialize)]
pub struct RoomMeta {
    pub id: String,
    pub room_number: u32,
    pub title: String,
    pub theme: String,
}

#[derive(Debug, Deserialize)]
pub struct Narrative {
    /// Main copy, shown from the moment the room is entered.
    pub body: String,
    /// Extra blocks revealed one by one (the final room's staged
    /// narrative). Empty for rooms that show everything at once.
    #[serde(default)]
    pub stages: Vec<String>,
    pub prompt: String,
    pub placeholder: String,
    #[serde(default)]
    pub hints: Vec<HintTier>,
}

/// One rung of the hint ladder: `text` becomes visible once the
/// player has `after` or more wrong attempts behind them.
#[derive(Debug, Deserialize, Clone)]
pub struct HintTier {
    pub after: u32,
    pub text: String,
}

impl Narrative {
    /// Hints unlocked at the given attempt count, in ladder order.
    pub fn visible_hints(&self, attempts: u32) -> impl Iterator<Item = &HintTier> {
        self.hints.iter().filter(move |tier| attempts >= tier.after)
    }
}

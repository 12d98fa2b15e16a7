pub mod rooms;
pub mod screens;
pub mod state;

pub use rooms::{validate, RoomId, Verdict};
pub use screens::{EndingScreen, IntroScreen, RoomScreen, Submission};
pub use state::{Game, Screen};

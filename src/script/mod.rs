pub mod loader;
pub mod types;

pub use loader::{load_script, load_wing};
pub use types::{HintTier, Narrative, RoomScript};

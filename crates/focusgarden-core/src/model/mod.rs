//! Domain entities: focus/block lists, the active session, garden
//! plants, per-day cycle stats, and user settings.

mod garden;
mod list;
mod session;
mod settings;
mod stats;

pub use garden::{GardenPlant, PlantKind, PlantStatus};
pub use list::{BlockKind, BlockList, FocusList};
pub use session::{Session, SessionState};
pub use settings::Settings;
pub use stats::CycleStat;

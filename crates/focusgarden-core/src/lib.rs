//! # Focusgarden Core Library
//!
//! This library provides the core business logic for Focusgarden, a
//! focus timer that grows (or withers) a garden of plants as the
//! reward for completed and abandoned focus cycles. It implements a
//! CLI-first philosophy where all operations are available via a
//! standalone CLI binary; any richer UI is a thin layer over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Session Engine**: a wall-clock-based state machine over the
//!   single active session. Deadlines are absolute timestamps, so the
//!   process can be torn down and relaunched at any point; callers
//!   drive it by invoking `poll()` or the explicit transitions.
//! - **Storage**: SQLite-backed key-value store holding lists, the
//!   active session, the garden, daily stats, and settings.
//! - **Recovery**: on cold start, state is reconstructed from the
//!   store and deadlines that passed while the process was unloaded
//!   are applied exactly once.
//! - **Alarm**: wake-up scheduling plus the detached deadline handler
//!   (notification, ambient audio stop, sound).
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: core session state machine
//! - [`Database`]: durable key-value store
//! - [`Resumed`]: cold-start recovery outcome
//! - [`blocking::active_block_list`]: contract for the content-blocking layer

pub mod alarm;
pub mod blocking;
pub mod error;
pub mod events;
pub mod model;
pub mod session;
pub mod storage;

pub use error::{CoreError, SessionError, StorageError, ValidationError};
pub use events::Event;
pub use model::{
    BlockKind, BlockList, CycleStat, FocusList, GardenPlant, PlantKind, PlantStatus, Session,
    SessionState, Settings,
};
pub use session::{Resumed, SessionEngine, Snapshot};
pub use storage::Database;

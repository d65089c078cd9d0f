pub mod accrual;
mod engine;
mod recovery;

pub use engine::{SessionEngine, Snapshot};
pub use recovery::Resumed;

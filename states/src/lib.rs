//! Typed application state for Slotboard.
//!
//! `StateCtx` stores one value per state type. Business code reads and mutates
//! those values through the context, while the UI only renders them.

mod ctx;
mod error;
mod state;
mod task;
mod time;

pub use ctx::StateCtx;
pub use error::Error;
pub use state::State;
pub use task::{TaskHandle, TaskId};
pub use time::Time;

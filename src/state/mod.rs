/// Board state management
///
/// This module holds the in-memory model the scoreboard mutates.
pub mod app_state;

pub use app_state::{AppState, Stats};

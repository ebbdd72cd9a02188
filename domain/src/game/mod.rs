//! Game state shared between phases

pub mod state;

pub use state::GameState;

//! BVPlayer - a borderless media player shell
//!
//! The window draws no system decorations; moving and resizing are
//! implemented in-process by classifying the cursor against edge margins
//! and running a gesture state machine over incremental pointer deltas.

pub mod player;
pub mod utils;
pub mod window;

pub use utils::config::Config;
pub use utils::error::{PlayerError, Result};

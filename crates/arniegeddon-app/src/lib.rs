//! ARniegeddon frame driver.
//!
//! Runs the game engine on a dedicated fixed-rate thread, forwards player
//! commands to it over a channel, and keeps the latest snapshot available
//! for polling. Also owns logger initialisation.

pub mod game_loop;
pub mod logging;
pub mod session;
pub mod state;

pub use arniegeddon_core as core;
pub use logging::init as init_logging;
pub use session::{GameSession, SessionError};

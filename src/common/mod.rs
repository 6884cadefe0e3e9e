pub mod commands;
pub mod events;
pub mod types;

pub use commands::SimulationCommand;
pub use events::SimulationEvent;
pub use types::{ChatMessage, MessageId};

pub mod engine;
pub mod incoming;
pub mod presence;

pub use engine::{Simulation, SimulationHandle};
pub use incoming::{compose_incoming, pick_reply_delay};
pub use presence::compute_presence;

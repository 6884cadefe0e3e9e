/// Commands the chat controller sends down to the simulation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// The local user posted a message; simulated users may answer.
    MessageSent,
}

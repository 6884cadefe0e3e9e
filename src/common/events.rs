use crate::common::types::ChatMessage;

/// Events the simulation task sends up to the chat controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    /// The whole online set was recomputed; the local user comes first.
    PresenceChanged(Vec<String>),
    MessageReceived(ChatMessage),
}

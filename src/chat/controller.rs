use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Handle;

use crate::common::{ChatMessage, SimulationCommand, SimulationEvent};
use crate::config::SimulationConfig;
use crate::simulation::{Simulation, SimulationHandle};
use crate::storage::{KeyValueStore, MessageStore, SessionStore};

/// Glue between the stores, their persisted copies and the simulated room.
///
/// Every successful mutation is followed by an explicit persist. Storage
/// failures are logged and the in-memory state stays authoritative.
pub struct ChatController<S> {
    storage: S,
    session: SessionStore,
    messages: MessageStore,
    online_users: Vec<String>,
    simulation_config: SimulationConfig,
    runtime: Handle,
    simulation: Option<SimulationHandle>,
}

impl<S: KeyValueStore> ChatController<S> {
    /// Restores session and history from `storage`. A restored session
    /// resumes its simulation straight away.
    pub fn new(storage: S, simulation_config: SimulationConfig, runtime: Handle) -> Self {
        let session = SessionStore::restore(&storage).unwrap_or_else(|err| {
            log::error!("Failed to read saved session: {err}");
            SessionStore::default()
        });
        let messages = MessageStore::restore(&storage).unwrap_or_else(|err| {
            log::error!("Failed to read saved messages: {err}");
            MessageStore::default()
        });
        log::info!("Restored {} message(s)", messages.len());

        let mut controller = Self {
            storage,
            session,
            messages,
            online_users: Vec::new(),
            simulation_config,
            runtime,
            simulation: None,
        };
        if let Some(username) = controller.session.current_user().map(str::to_string) {
            log::info!("Resuming session for {username}");
            controller.start_simulation(username);
        }
        controller
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.current_user()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.messages.messages()
    }

    /// Online users, local user first. Empty while logged out.
    pub fn online_users(&self) -> &[String] {
        &self.online_users
    }

    pub fn is_simulating(&self) -> bool {
        self.simulation.is_some()
    }

    /// Logs in as the trimmed `username`. Blank input is refused. Logging in
    /// while a session is active replaces it.
    pub fn login(&mut self, username: &str) -> bool {
        if !self.session.login(username) {
            return false;
        }
        if let Err(err) = self.session.persist(&self.storage) {
            log::error!("Failed to persist session: {err}");
        }

        let username = username.trim().to_string();
        log::info!("Logged in as {username}");
        self.start_simulation(username);
        true
    }

    /// Ends the session and stops its simulation before anything else can
    /// be delivered.
    pub fn logout(&mut self) -> Option<String> {
        self.stop_simulation();
        let previous = self.session.logout();
        if let Err(err) = self.session.persist(&self.storage) {
            log::error!("Failed to remove persisted session: {err}");
        }
        if let Some(username) = &previous {
            log::info!("Logged out {username}");
        }
        previous
    }

    /// Posts `content` as the local user. Returns the stored message, or
    /// `None` when logged out or the text is blank.
    pub fn send_message(&mut self, content: &str) -> Option<&ChatMessage> {
        let username = self.session.current_user()?;
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let message = ChatMessage::new(username, content);
        if !self.append_and_persist(message) {
            return None;
        }
        if let Some(simulation) = &self.simulation {
            simulation.send_command(SimulationCommand::MessageSent);
        }
        self.messages.messages().last()
    }

    /// Empties the history and deletes its persisted copy.
    pub fn clear_chat(&mut self) {
        self.messages.clear();
        if let Err(err) = MessageStore::remove_persisted(&self.storage) {
            log::error!("Failed to remove persisted messages: {err}");
        }
        log::info!("Chat cleared");
    }

    /// Applies every event the simulation has ready. Returns how many were
    /// applied.
    pub fn poll_simulation(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self
            .simulation
            .as_mut()
            .and_then(SimulationHandle::try_next_event)
        {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next simulation event and applies it. `None` when no
    /// simulation is running.
    pub async fn step(&mut self) -> Option<SimulationEvent> {
        let event = self.simulation.as_mut()?.next_event().await?;
        self.apply_event(event.clone());
        Some(event)
    }

    fn apply_event(&mut self, event: SimulationEvent) {
        match event {
            SimulationEvent::PresenceChanged(users) => self.online_users = users,
            SimulationEvent::MessageReceived(message) => {
                if self.session.current_user() == Some(message.username.as_str()) {
                    log::warn!("Ignoring simulated message attributed to the local user");
                    return;
                }
                log::debug!("Incoming message from {}", message.username);
                self.append_and_persist(message);
            }
        }
    }

    fn append_and_persist(&mut self, message: ChatMessage) -> bool {
        if !self.messages.append(message) {
            return false;
        }
        if let Err(err) = self.messages.persist(&self.storage) {
            log::error!("Failed to persist messages: {err}");
        }
        true
    }

    fn start_simulation(&mut self, username: String) {
        self.stop_simulation();
        self.online_users = vec![username.clone()];
        self.simulation = Some(Simulation::spawn(
            username,
            self.simulation_config.clone(),
            StdRng::from_entropy(),
            &self.runtime,
        ));
    }

    fn stop_simulation(&mut self) {
        if let Some(simulation) = self.simulation.take() {
            simulation.shutdown();
        }
        self.online_users.clear();
    }
}

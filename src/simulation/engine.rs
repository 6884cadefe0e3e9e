use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::common::{SimulationCommand, SimulationEvent};
use crate::config::SimulationConfig;

use super::incoming::{compose_incoming, has_other_users, pick_reply_delay};
use super::presence::compute_presence;

const CHANNEL_CAPACITY: usize = 100;

/// Background task that fakes the rest of the room for one session.
///
/// It owns the presence interval and at most one pending delivery. A new
/// trigger while a delivery is pending is ignored; the next delivery is
/// scheduled once the pending one fires.
pub struct Simulation<R> {
    current_user: String,
    config: SimulationConfig,
    rng: R,
    presence: Vec<String>,
    pending_delivery: Option<Instant>,
    event_sender: mpsc::Sender<SimulationEvent>,
    command_receiver: mpsc::Receiver<SimulationCommand>,
}

impl<R: Rng + Send + 'static> Simulation<R> {
    /// Starts the simulation for `current_user` on `runtime`.
    pub fn spawn(
        current_user: impl Into<String>,
        config: SimulationConfig,
        rng: R,
        runtime: &Handle,
    ) -> SimulationHandle {
        let current_user = current_user.into();
        let (command_sender, command_receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let (event_sender, event_receiver) = mpsc::channel(CHANNEL_CAPACITY);

        let simulation = Self {
            current_user: current_user.clone(),
            presence: vec![current_user.clone()],
            config,
            rng,
            pending_delivery: None,
            event_sender,
            command_receiver,
        };
        let task = runtime.spawn(simulation.run());
        log::info!("Simulation started for {current_user}");

        SimulationHandle {
            current_user,
            command_sender,
            event_receiver,
            task,
        }
    }

    async fn run(mut self) {
        // The first tick completes immediately, so presence is computed on
        // activation and then once per interval.
        let mut ticker = time::interval(self.config.presence_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let deadline = self.pending_delivery;
            let wake_at = deadline.unwrap_or_else(Instant::now);
            tokio::select! {
                _ = ticker.tick() => {
                    self.recompute_presence();
                    let event = SimulationEvent::PresenceChanged(self.presence.clone());
                    if self.event_sender.send(event).await.is_err() {
                        break;
                    }
                    self.schedule_delivery();
                }
                _ = time::sleep_until(wake_at), if deadline.is_some() => {
                    self.pending_delivery = None;
                    if !self.deliver().await {
                        break;
                    }
                    self.schedule_delivery();
                }
                command = self.command_receiver.recv() => match command {
                    Some(SimulationCommand::MessageSent) => self.schedule_delivery(),
                    None => break,
                },
            }
        }

        log::debug!("Simulation loop for {} exited", self.current_user);
    }

    fn recompute_presence(&mut self) {
        self.presence = compute_presence(
            &self.current_user,
            &self.config.candidate_pool,
            self.config.others_range(),
            &mut self.rng,
        );
        log::debug!("Presence recomputed: {}", self.presence.join(", "));
    }

    fn schedule_delivery(&mut self) {
        if self.pending_delivery.is_some() {
            return;
        }
        if !has_other_users(&self.presence, &self.current_user) {
            return;
        }
        let delay = pick_reply_delay(&self.config.reply_delay(), &mut self.rng);
        self.pending_delivery = Some(Instant::now() + delay);
        log::debug!("Incoming message scheduled in {:.1}s", delay.as_secs_f64());
    }

    /// Sends one canned message from whoever else is online right now.
    /// Returns `false` once nobody is listening any more.
    async fn deliver(&mut self) -> bool {
        let Some(message) = compose_incoming(
            &self.presence,
            &self.current_user,
            &self.config.canned_messages,
            &mut self.rng,
        ) else {
            log::debug!("Scheduled delivery dropped: nobody else online");
            return true;
        };

        self.event_sender
            .send(SimulationEvent::MessageReceived(message))
            .await
            .is_ok()
    }
}

/// Owner of a running simulation. Dropping it stops the task, and any event
/// still queued is discarded with the receiver.
pub struct SimulationHandle {
    current_user: String,
    command_sender: mpsc::Sender<SimulationCommand>,
    event_receiver: mpsc::Receiver<SimulationEvent>,
    task: JoinHandle<()>,
}

impl SimulationHandle {
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn send_command(&self, command: SimulationCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to simulation: {err}");
        }
    }

    /// Next event without waiting, for frame-driven callers.
    pub fn try_next_event(&mut self) -> Option<SimulationEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Waits for the next event; `None` once the task has stopped.
    pub async fn next_event(&mut self) -> Option<SimulationEvent> {
        self.event_receiver.recv().await
    }

    pub fn shutdown(self) {
        log::info!("Simulation stopped for {}", self.current_user);
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn start(config: SimulationConfig, seed: u64) -> SimulationHandle {
        Simulation::spawn(
            "Sam",
            config,
            StdRng::seed_from_u64(seed),
            &Handle::current(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn presence_is_published_on_start() {
        let mut handle = start(SimulationConfig::default(), 1);
        let began = Instant::now();

        let Some(SimulationEvent::PresenceChanged(users)) = handle.next_event().await else {
            panic!("expected presence first");
        };
        assert_eq!(began.elapsed(), Duration::ZERO);
        assert_eq!(users[0], "Sam");
        assert!((2..=4).contains(&users.len()));
    }

    #[tokio::test(start_paused = true)]
    async fn presence_recomputes_every_interval() {
        let config = SimulationConfig {
            reply_delay_min_secs: 1_000,
            reply_delay_max_secs: 1_001,
            ..SimulationConfig::default()
        };
        let mut handle = start(config, 2);
        let began = Instant::now();

        let mut seen_at = Vec::new();
        while seen_at.len() < 3 {
            if let Some(SimulationEvent::PresenceChanged(_)) = handle.next_event().await {
                seen_at.push(began.elapsed().as_secs());
            }
        }
        assert_eq!(seen_at, [0, 30, 60]);
    }

    #[tokio::test(start_paused = true)]
    async fn incoming_message_comes_from_someone_else_online() {
        let mut handle = start(SimulationConfig::default(), 3);
        let began = Instant::now();
        let mut presence = Vec::new();

        let message = loop {
            match handle.next_event().await {
                Some(SimulationEvent::PresenceChanged(users)) => presence = users,
                Some(SimulationEvent::MessageReceived(message)) => break message,
                None => panic!("simulation stopped"),
            }
        };

        assert!(began.elapsed() >= Duration::from_secs(15));
        assert_ne!(message.username, "Sam");
        assert!(presence.contains(&message.username));
        assert!(
            SimulationConfig::default()
                .canned_messages
                .contains(&message.content)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_triggers_do_not_stack_deliveries() {
        let config = SimulationConfig {
            presence_interval_secs: 10_000,
            reply_delay_min_secs: 20,
            reply_delay_max_secs: 21,
            ..SimulationConfig::default()
        };
        let mut handle = start(config, 4);
        for _ in 0..10 {
            handle.send_command(SimulationCommand::MessageSent);
        }

        let mut received = 0;
        let _ = time::timeout(Duration::from_secs(39), async {
            while let Some(event) = handle.next_event().await {
                if let SimulationEvent::MessageReceived(_) = event {
                    received += 1;
                }
            }
        })
        .await;
        assert_eq!(received, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nobody_else_online_means_no_messages() {
        let config = SimulationConfig {
            candidate_pool: Vec::new(),
            ..SimulationConfig::default()
        };
        let mut handle = start(config, 5);
        handle.send_command(SimulationCommand::MessageSent);

        let waited = time::timeout(Duration::from_secs(300), async {
            loop {
                match handle.next_event().await {
                    Some(SimulationEvent::PresenceChanged(users)) => assert_eq!(users, ["Sam"]),
                    other => return other,
                }
            }
        })
        .await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_task_stops_emitting() {
        let mut handle = start(SimulationConfig::default(), 6);
        assert!(matches!(
            handle.next_event().await,
            Some(SimulationEvent::PresenceChanged(_))
        ));

        handle.task.abort();
        time::sleep(Duration::from_secs(120)).await;

        while let Some(event) = handle.next_event().await {
            assert!(!matches!(event, SimulationEvent::MessageReceived(_)));
        }
    }
}

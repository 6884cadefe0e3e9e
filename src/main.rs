use std::error::Error;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::runtime::Handle;

use sim_chat::chat::ChatController;
use sim_chat::common::SimulationEvent;
use sim_chat::config::{self, AppConfig};
use sim_chat::storage::{LocalStorage, MessageStore, SessionStore};
use sim_chat::ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "sim_chat",
    version,
    about = "Single-room chat with simulated participants"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Override the storage file from the config
    #[arg(long, value_name = "FILE")]
    storage: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Run the simulated room without a UI, logging what happens
    Headless {
        #[arg(long)]
        username: String,
    },
    /// Forget the saved session and message history
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(storage) = cli.storage {
        app_config.storage_path = storage;
    }

    match cli.mode {
        Some(Mode::Reset) => reset_storage(&app_config),
        Some(Mode::Headless { username }) => run_headless(app_config, &username).await,
        None => run_desktop(app_config),
    }
}

fn open_controller(app_config: AppConfig) -> Result<ChatController<LocalStorage>, Box<dyn Error>> {
    let storage = LocalStorage::open(&app_config.storage_path)?;
    log::info!("Using storage {}", app_config.storage_path);
    Ok(ChatController::new(
        storage,
        app_config.simulation,
        Handle::current(),
    ))
}

fn reset_storage(app_config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let storage = LocalStorage::open(&app_config.storage_path)?;
    SessionStore::default().persist(&storage)?;
    MessageStore::remove_persisted(&storage)?;
    log::info!(
        "Cleared saved session and history in {}",
        app_config.storage_path
    );
    Ok(())
}

async fn run_headless(app_config: AppConfig, username: &str) -> Result<(), Box<dyn Error>> {
    let mut controller = open_controller(app_config)?;
    if !controller.login(username) {
        return Err("username must not be blank".into());
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            event = controller.step() => match event {
                Some(SimulationEvent::PresenceChanged(users)) => {
                    log::info!("Online ({}): {}", users.len(), users.join(", "));
                }
                Some(SimulationEvent::MessageReceived(message)) => {
                    log::info!("[{}] {}: {}", message.timestamp, message.username, message.content);
                }
                None => {
                    log::error!("Simulation terminated unexpectedly");
                    break;
                }
            }
        }
    }

    log::info!(
        "Shutting down; {} message(s) stored",
        controller.messages().len()
    );
    Ok(())
}

fn run_desktop(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    let controller = open_controller(app_config)?;
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Chat App",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, controller)))),
    )?;
    Ok(())
}

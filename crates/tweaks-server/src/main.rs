//! Tweaks module runner
//!
//! This binary:
//! 1. Loads `config.json` (or the file named by `TWEAKS_CONFIG`)
//! 2. Builds an in-memory host with an overworld spawn
//! 3. Registers and enables every module
//! 4. Waits for commands until Ctrl-C or `quit`, then disables modules in
//!    reverse order
//!
//! Commands:
//! - `r` or `reload` - Re-read the configuration and reload all modules
//! - `l` or `list` - List enabled modules
//! - `q` or `quit` - Quit the server
//! - `help` - Show help

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use module_teleport::TeleportModule;
use tracing::{error, info};
use tweaks_event::EventBus;
use tweaks_host::{Location, MemoryHost, WorldId};
use tweaks_module::{ModuleContext, ModuleRegistry, TweaksConfig};

/// Commands that can be sent from the input thread or the signal handler
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Reload,
    List,
    Quit,
    Help,
    Unknown(String),
}

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tweaks_server=info".parse()?)
                .add_directive("tweaks_module=info".parse()?)
                .add_directive("module_teleport=info".parse()?),
        )
        .init();

    info!("Starting tweaks server");

    let config_path = std::env::var("TWEAKS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));

    info!("Configuration file: {}", config_path.display());
    let config = TweaksConfig::load_or_default(&config_path)?;

    let host = Arc::new(MemoryHost::new());
    host.set_spawn_location(Location::new(WorldId::OVERWORLD, 0.5, 64.0, 0.5));

    let ctx = ModuleContext::new(EventBus::new(), host.clone())
        .with_teleport_menu(host)
        .with_config(config);

    let mut registry = ModuleRegistry::new(ctx.clone());
    registry.register(TeleportModule::new(ctx));

    let enabled = registry.enable_all();
    info!(
        "Enabled {} of {} module(s): {:?}",
        enabled,
        registry.len(),
        registry.loaded_modules()
    );

    // Set up command channel
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

    let signal_tx = cmd_tx.clone();
    ctrlc::set_handler(move || {
        let _ = signal_tx.send(Command::Quit);
    })?;

    thread::spawn(move || {
        input_thread(cmd_tx);
    });

    print_prompt();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            Command::Reload => {
                info!("Manual reload requested");
                match TweaksConfig::load_or_default(&config_path) {
                    Ok(config) => {
                        let count = registry.reload(config);
                        info!("Reloaded, {} module(s) enabled", count);
                    }
                    Err(e) => error!("Keeping current modules, configuration failed: {}", e),
                }
            }
            Command::List => {
                let modules = registry.loaded_modules();
                info!("Enabled modules ({}):", modules.len());
                for name in modules {
                    info!("  - {}", name);
                }
            }
            Command::Quit => {
                info!("Shutting down...");
                break;
            }
            Command::Help => {
                info!("Commands:");
                info!("  r, reload  - Reload configuration and modules");
                info!("  l, list    - List enabled modules");
                info!("  q, quit    - Quit the server");
                info!("  help       - Show this help");
            }
            Command::Unknown(s) => {
                if !s.is_empty() {
                    info!("Unknown command: '{}'. Type 'help' for commands.", s);
                }
            }
        }
        print_prompt();
    }

    let disabled = registry.disable_all();
    info!("Disabled {} module(s)", disabled);

    Ok(())
}

fn input_thread(tx: mpsc::Sender<Command>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };

        let cmd = parse_command(&line);
        let is_quit = cmd == Command::Quit;
        if tx.send(cmd).is_err() || is_quit {
            return;
        }
    }

    // Stdin closed
    let _ = tx.send(Command::Quit);
}

fn parse_command(input: &str) -> Command {
    match input.trim().to_lowercase().as_str() {
        "r" | "reload" => Command::Reload,
        "l" | "list" => Command::List,
        "q" | "quit" | "exit" => Command::Quit,
        "help" | "h" | "?" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

#[allow(clippy::print_stdout)]
fn print_prompt() {
    print!("> ");
    io::stdout().flush().ok();
}

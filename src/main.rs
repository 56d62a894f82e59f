use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use chatify::config;
use chatify::network::supervisor;
use chatify::ui::ChatApp;

#[derive(Parser)]
#[command(name = "chatify", version, about = "Realtime relay chat client")]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Relay endpoint override
    #[arg(long, value_name = "URL")]
    relay: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let relay_url = config::resolve_relay_url(cli.relay, &app_config);

    // Session -> network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> session
    let (event_tx, event_rx) = mpsc::channel(100);

    tokio::spawn(async move {
        supervisor::run(relay_url, event_tx, cmd_rx).await;
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Chatify",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");
            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}

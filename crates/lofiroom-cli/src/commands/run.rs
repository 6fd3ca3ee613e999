//! Interactive session on the terminal.
//!
//! Stdin lines are parsed into commands; every event the session produces is
//! printed to stdout as one JSON line. Failures are printed as
//! `{"type":"Error","message":...}` lines and the session keeps going.

use std::path::Path;

use lofiroom_core::session::runner::{self, Output};
use lofiroom_core::{AudioEngine, Command, Config, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::load_config;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let tracks = config.track_list()?;

    #[cfg(feature = "rodio")]
    let engine: Box<dyn AudioEngine> = Box::new(super::audio::RodioEngine::open()?);
    #[cfg(not(feature = "rodio"))]
    let engine: Box<dyn AudioEngine> = Box::new(lofiroom_core::SimulatedEngine::for_tracks(&tracks));

    tracing::info!(tracks = tracks.len(), "starting session");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(engine, &config))
}

async fn drive<E: AudioEngine>(engine: E, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(engine, config)?;
    println!("{}", serde_json::to_string(&session.snapshot())?);

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ev_tx, ev_rx) = mpsc::unbounded_channel();

    let (_session, read_result, print_result) = tokio::join!(
        runner::run(session, cmd_rx, ev_tx),
        read_commands(cmd_tx),
        print_outputs(ev_rx),
    );
    read_result?;
    print_result?;
    Ok(())
}

async fn read_commands(commands: mpsc::Sender<Command>) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                let quit = command == Command::Quit;
                if commands.send(command).await.is_err() || quit {
                    break;
                }
            }
            Err(e) => print_error(&e.to_string()),
        }
    }
    // Dropping the sender ends the session on EOF.
    Ok(())
}

async fn print_outputs(
    mut outputs: mpsc::UnboundedReceiver<Output>,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(output) = outputs.recv().await {
        match output {
            Ok(event) => println!("{}", serde_json::to_string(&event)?),
            Err(e) => print_error(&e.to_string()),
        }
    }
    Ok(())
}

fn print_error(message: &str) {
    println!("{}", serde_json::json!({ "type": "Error", "message": message }));
}

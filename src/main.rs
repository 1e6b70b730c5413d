use anyhow::{Context, Result};
use clap::Parser;
use parrot_box::peripherals::{NetworkAssociation, SimButton, SimMicrophone, SimNetwork, SimSpeaker};
use parrot_box::store::{FileMedium, SequentialStore};
use parrot_box::{Config, RecordPlaybackController};
use std::time::Duration;
use tracing::info;

/// Push-to-talk record/replay pipeline, wired to the simulated peripheral
/// rig for host runs.
#[derive(Parser, Debug)]
#[command(name = "parrot-box", version)]
struct Args {
    /// Config file path, without extension
    #[arg(long, default_value = "config/parrot-box")]
    config: String,

    /// How many microphone blocks the simulated press lasts
    #[arg(long, default_value_t = 32)]
    hold_blocks: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("parrot-box v0.1.0");
    info!(
        "audio: {} Hz, {} frames/block; button: {} ms debounce; scratch: {}",
        cfg.audio.sample_rate, cfg.audio.block_frames, cfg.button.debounce_ms,
        cfg.storage.scratch_path
    );

    // Network association gates startup: the device is not usable without
    // it, so a failure here stops the boot.
    let mut network = SimNetwork::new();
    network
        .connect(
            &cfg.network.ssid,
            &cfg.network.password,
            Duration::from_millis(cfg.network.connect_timeout_ms),
        )
        .await
        .context("network association failed")?;

    let mic = SimMicrophone::new(cfg.audio.sample_rate, 440);
    let delivered = mic.delivered();
    let speaker = SimSpeaker::new();
    let button =
        SimButton::pressed_until_blocks(delivered, args.hold_blocks, cfg.button.pressed_level());
    let store = SequentialStore::new(Box::new(FileMedium::new(&cfg.storage.scratch_path)));

    let mut controller = RecordPlaybackController::new(
        cfg.audio.clone(),
        cfg.button.clone(),
        store,
        Box::new(mic),
        Box::new(speaker),
        Box::new(button),
    );

    let stats = controller.run_session().await?;
    info!("session stats:\n{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

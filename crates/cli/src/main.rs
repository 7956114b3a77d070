mod cli;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recoda_core::{load_config, ConversionRequest, FfmpegEncoder, JobEvent, JobRunner};

use cli::Cli;

/// Buffer size for the job event channel
const EVENT_BUFFER_SIZE: usize = 100;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging on stderr, keeping stdout for the progress display
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();

    // Load configuration
    let mut config = load_config().context("Failed to load configuration")?;
    if let Some(encoder_path) = args.encoder {
        config.encoder_path = encoder_path;
    }

    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => args
            .input
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let request =
        ConversionRequest::new(args.input, output_dir, args.format).with_bitrate_str(&args.bitrate);

    let encoder = FfmpegEncoder::new(config.clone());
    let runner = JobRunner::new(config, encoder);

    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER_SIZE);
    runner.start(request, tx).await?;

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancel_requested = false;
    let mut progress_shown = false;

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(JobEvent::Progress { percent }) => {
                    print!("\rprogress: {:>3}%", percent);
                    let _ = std::io::stdout().flush();
                    progress_shown = true;
                }
                Some(JobEvent::Log { line }) => println!("{}", line),
                Some(JobEvent::Finished { success, message }) => {
                    if progress_shown {
                        println!();
                        progress_shown = false;
                    }
                    if success {
                        println!("{}", message);
                    } else {
                        anyhow::bail!(message);
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c, if !cancel_requested => {
                cancel_requested = true;
                info!("Interrupt received, cancelling conversion");
                runner.cancel().await;
            }
        }
    }

    Ok(())
}

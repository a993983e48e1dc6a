//! `ppgscale-ingest`: record UDP sensor datagrams to CSV
//!
//! ```text
//! ppgscale-ingest --port 5005 --out-dir ./udp_data
//! PPGSCALE_LOG=debug ppgscale-ingest --window 100
//! ```

use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use ppgscale_ingest::{CsvRecorder, IngestConfig, IngestError, IngestStats, UdpIngest};

/// Record IMU + PPG datagrams from sensor nodes
#[derive(Debug, Parser)]
#[command(name = "ppgscale-ingest", version, about)]
struct Args {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<IpAddr>,

    /// UDP port
    #[arg(long)]
    port: Option<u16>,

    /// Directory for capture files
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Receive buffer size in bytes
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Samples per feature window
    #[arg(long)]
    window: Option<usize>,
}

impl Args {
    fn into_config(self) -> Result<IngestConfig, IngestError> {
        let mut config = match &self.config {
            Some(path) => IngestConfig::from_json_file(path)?,
            None => IngestConfig::default(),
        };
        if let Some(ip) = self.bind {
            config = config.with_bind_ip(ip);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(dir) = self.out_dir {
            config = config.with_out_dir(dir);
        }
        if let Some(size) = self.buffer_size {
            config = config.with_buffer_size(size);
        }
        if let Some(window) = self.window {
            config = config.with_window_size(window);
        }
        config.validate()?;
        Ok(config)
    }
}

async fn run(config: IngestConfig) -> Result<IngestStats, IngestError> {
    let recorder = CsvRecorder::create(&config.out_dir)?;
    let ingest = UdpIngest::bind(config, recorder).await?;
    ingest
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("PPGSCALE_LOG", "info")).init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(stats) => {
            info!("{} rows written", stats.rows_written);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

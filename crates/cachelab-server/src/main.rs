//! `cachelab-server` binary: loads a dataset, runs one cache replacement
//! policy, and answers `fetch` requests over a line-oriented TCP protocol.

use std::fs::OpenOptions;
use std::net::SocketAddr;

use cachelab_core::sync::{Arc, Mutex};
use cachelab_core::{Cache, CacheType, Dataset};
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachelab_server::dispatch;

const PORT: u16 = 1234;
const MAX_REQUEST_BYTES: usize = 1024;

/// `cachelab-server` - runs one cache replacement policy against a dataset.
#[derive(Parser, Debug)]
#[command(name = "cachelab-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the append-only server log file.
    #[arg(long, default_value = "./log/server.log", env = "CACHELAB_LOGFILE")]
    logfile: String,

    /// Path to the dataset CSV (`key,value,cost`, no header).
    #[arg(
        long,
        default_value = "./data/test_set_1.csv",
        env = "CACHELAB_DATA_FILE"
    )]
    data_file: String,

    /// Replacement policy: NONE, FIFO, LRU, LFU, LCR, LECAR, or LECARAC (CALeCaR).
    #[arg(long, default_value = "FIFO", env = "CACHELAB_CACHE_TYPE")]
    cache_type: String,

    /// Cache capacity.
    #[arg(long, default_value_t = 1000, env = "CACHELAB_CACHE_SIZE")]
    cache_size: usize,
}

fn init_tracing(logfile: &str) -> anyhow::Result<()> {
    if let Some(parent) = std::path::Path::new(logfile).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(logfile)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.logfile)?;

    tracing::info!("starting cachelab-server...");
    tracing::info!(data_file = %args.data_file, "loading dataset");

    let dataset = match Dataset::load(&args.data_file) {
        Ok(dataset) => dataset,
        Err(err) => {
            tracing::error!(error = %err, code = err.code(), "fatal: could not load dataset");
            std::process::exit(1);
        }
    };

    let cache_type = CacheType::parse_or_default(&args.cache_type);
    tracing::info!(
        cache_type = %cache_type,
        cache_size = args.cache_size,
        rows = dataset.len(),
        "dataset loaded"
    );

    let dataset = Arc::new(dataset);
    let cache = Arc::new(Mutex::new(Cache::new(cache_type, args.cache_size)));

    let addr = SocketAddr::from(([0, 0, 0, 0], PORT));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "cachelab-server listening");

    loop {
        let (socket, peer) = listener.accept().await?;
        let dataset = Arc::clone(&dataset);
        let cache = Arc::clone(&cache);

        tokio::spawn(async move {
            if let Err(err) = handle_connection(socket, &dataset, &cache).await {
                tracing::warn!(%peer, error = %err, "connection error");
            }
        });
    }
}

async fn handle_connection(
    mut socket: tokio::net::TcpStream,
    dataset: &Dataset,
    cache: &Arc<Mutex<Cache>>,
) -> anyhow::Result<()> {
    let mut buf = vec![0u8; MAX_REQUEST_BYTES];
    let response = match socket.read(&mut buf).await {
        Ok(0) => return Ok(()),
        Ok(n) => {
            let mut cache = cache.lock();
            dispatch(&buf[..n], dataset, &mut *cache)
        }
        Err(err) => {
            tracing::warn!(error = %err, "read failure");
            "Read Failure, check logs...".to_string()
        }
    };

    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await?;
    Ok(())
}

//! `cachelab-client` binary: replays a trace of keys against a running
//! `cachelab-server` and reports accumulated recomputation cost and hit
//! rate (§4.10).

use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CHECKPOINT_INTERVAL: u64 = 10_000;

/// `cachelab-client` - replays a trace of keys and reports cache performance.
#[derive(Parser, Debug)]
#[command(name = "cachelab-client")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comma-separated list of trace CSV paths; first column of each row is a key.
    #[arg(
        long,
        default_value = "./data/client/traffic_set_baseline.csv",
        env = "CACHELAB_KEYFILE"
    )]
    keyfile: String,

    /// Emit a log line for every request, not just checkpoints.
    #[arg(long, default_value_t = false, env = "CACHELAB_VERBOSE")]
    verbose: bool,

    /// Server address to dial for every request.
    #[arg(long, default_value = "127.0.0.1:1234", env = "CACHELAB_SERVER_ADDR")]
    server_addr: String,
}

#[derive(Default)]
struct Totals {
    total_requests: u64,
    cache_served_requests: u64,
    accumulated_cost: u64,
}

impl Totals {
    fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.cache_served_requests as f64 / self.total_requests as f64
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let keyfiles: Vec<&str> = args.keyfile.split(',').map(str::trim).collect();
    tracing::info!(?keyfiles, server_addr = %args.server_addr, "starting trace replay");

    let mut totals = Totals::default();

    for path in &keyfiles {
        replay_file(path, &args, &mut totals).await?;
    }

    tracing::info!(
        total_requests = totals.total_requests,
        accumulated_cost = totals.accumulated_cost,
        hit_rate = totals.hit_rate(),
        "trace replay complete"
    );

    Ok(())
}

async fn replay_file(path: &str, args: &Args, totals: &mut Totals) -> anyhow::Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    for result in reader.records() {
        let record = result?;
        let Some(key) = record.get(0) else {
            tracing::warn!(path, "trace row has no key column, skipping");
            continue;
        };

        match fetch_key(&args.server_addr, key).await {
            Ok(Some(cost)) => {
                totals.total_requests += 1;
                totals.accumulated_cost = totals.accumulated_cost.saturating_add(cost);
                if cost == 0 {
                    totals.cache_served_requests += 1;
                }
            }
            Ok(None) => {
                totals.total_requests += 1;
                tracing::warn!(key, "response had no parseable COST line");
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "request failed");
            }
        }

        if args.verbose {
            tracing::info!(
                key,
                total_requests = totals.total_requests,
                accumulated_cost = totals.accumulated_cost,
                "request complete"
            );
        } else if totals.total_requests > 0 && totals.total_requests % CHECKPOINT_INTERVAL == 0 {
            tracing::info!(
                key_index = totals.total_requests,
                accumulated_cost = totals.accumulated_cost,
                hit_rate = totals.hit_rate(),
                "checkpoint"
            );
        }
    }

    Ok(())
}

/// Dials the server, sends one `fetch,<key>` request, and parses the cost
/// out of the response. Returns `Ok(None)` if the response has no `COST:`
/// line (e.g. a dataset miss or a protocol error response).
async fn fetch_key(server_addr: &str, key: &str) -> anyhow::Result<Option<u64>> {
    let mut socket = TcpStream::connect(server_addr).await?;
    socket.write_all(format!("fetch,{key}").as_bytes()).await?;
    socket.shutdown().await.ok();

    let mut response = String::new();
    socket.read_to_string(&mut response).await?;

    Ok(parse_cost(&response))
}

fn parse_cost(response: &str) -> Option<u64> {
    response.lines().find_map(|line| {
        line.strip_prefix("COST:")
            .and_then(|rest| rest.trim().parse().ok())
    })
}

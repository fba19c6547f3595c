//! Pokedex - An interactive PokeAPI client
//!
//! Browses location areas and catches pokemon from a REPL.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{Config, PokeApiClient, Repl, TtlCache};

/// Grace period for runtime tasks once the session has ended
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Build the tokio runtime
/// 3. Run the session (see [`run`])
/// 4. Shut the runtime down without waiting on a blocked stdin read
fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so log lines do not interleave with REPL output,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let outcome = runtime.block_on(run(Config::from_env()));

    // A pending stdin read holds a blocking thread that cannot be cancelled;
    // a plain drop of the runtime would wait for the next line of input.
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);

    outcome
}

/// Runs one REPL session.
///
/// 1. Create the response cache, which starts its reaper
/// 2. Create the PokeAPI client around the shared cache
/// 3. Run the REPL on stdin until `exit`, end of input, or Ctrl+C
/// 4. Shut the cache down and wait for the reaper to stop
async fn run(config: Config) -> anyhow::Result<()> {
    info!(
        cache_ttl_ms = config.cache_ttl_ms,
        api_base_url = %config.api_base_url,
        http_timeout_secs = config.http_timeout_secs,
        "Configuration loaded"
    );

    let cache = Arc::new(TtlCache::new(config.cache_ttl()).context("Failed to create response cache")?);
    let client = PokeApiClient::from_config(&config, cache.clone())
        .context("Failed to create PokeAPI client")?;

    let mut repl = Repl::new(
        client,
        config.catch_difficulty,
        StdRng::from_entropy(),
        io::stdout(),
    );
    let stdin = BufReader::new(tokio::io::stdin());

    let outcome = repl
        .run_until(stdin, signal::ctrl_c())
        .await
        .context("REPL terminated");

    cache.shutdown().await;
    info!(stats = ?cache.stats(), "Cache shut down");

    outcome
}

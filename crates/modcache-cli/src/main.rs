//! modcache - inspect and prune the local mod catalog cache.
//!
//! Reads whatever a front end has cached under the configured cache
//! directory and prints it. Nothing here touches the network.

mod commands;

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Command;
use modcache_core::{Config, ModCache};

/// Environment variable naming an additional log file
const LOG_FILE_ENV: &str = "MODCACHE_LOG_FILE";

const USAGE: &str = "\
usage: modcache <command> [args]

commands:
  list [offset]               list cached mods
  count                       number of cached mods
  show <mod_id>               show a cached mod profile
  stats <mod_id>              show cached statistics for a mod
  team <mod_id>               show the cached team of a mod
  files <mod_id> <modfile_id> show a cached modfile and its archive
  user <user_id>              show a cached user profile
  users                       list cached users
  evict <mod_id>              remove everything cached for a mod
  evict-user <user_id>        remove a cached user and their avatars
  path                        print the cache directory";

/// Initialize the tracing subscriber for logging.
///
/// The returned guard flushes the file writer on drop and must outlive
/// every log call.
fn init_tracing() -> Option<WorkerGuard> {
    // RUST_LOG controls the level (e.g. RUST_LOG=modcache_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var_os(LOG_FILE_ENV) {
        Some(path) => {
            let path = Path::new(&path);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path.file_name().unwrap_or(path.as_os_str());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            bail!("invalid arguments");
        }
    };

    let config = Config::load().context("Failed to load configuration")?;
    let cache = ModCache::from_config(&config).context("Failed to open cache directory")?;
    info!(root = %cache.root().display(), ?command, "Running command");

    let stdout = io::stdout();
    commands::run(&cache, &command, &mut stdout.lock())
}

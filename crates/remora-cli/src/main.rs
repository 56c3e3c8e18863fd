use remora_core::{MapOptions, diff_envelopes, has_changes, synthesize_map};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod clients;
mod config;

use clients::{TripwireClient, WandererClient};
use config::Config;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Config(String),
    Api { status: u16, body: String },
    Transport(String),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Config(message) => write!(f, "{message}"),
            CliError::Api { status, body } => {
                write!(f, "API returned status {status}: {body}")
            }
            CliError::Transport(message) => write!(f, "transport error: {message}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Args {
    dry_run: bool,
    once: bool,
}

fn usage() -> &'static str {
    "remora-cli\n\
\n\
USAGE:\n\
  remora-cli [--dry-run] [--once]\n\
\n\
FLAGS:\n\
  --dry-run   Build the map and print it as JSON instead of submitting it.\n\
  --once      Run a single sync even when POLL_INTERVAL_SECONDS is set.\n\
  -h, --help  Print this help.\n\
\n\
ENVIRONMENT:\n\
  TW_URL                   Tripwire base URL (required)\n\
  TW_USER                  Tripwire account name (required)\n\
  TW_PASSWORD              Tripwire account password (required)\n\
  TW_MASK_ID               Tripwire mask to read (required)\n\
  WANDERER_URL             Wanderer base URL (required)\n\
  WANDERER_API_KEY         Wanderer map API token (required)\n\
  WANDERER_MAP_SLUG        Wanderer map slug (required)\n\
  WANDERER_HOME_SYSTEM_ID  Solar system id the chain starts from (required)\n\
  POSITION_X_SEPARATION    Horizontal spacing between chain depths (default 195)\n\
  POSITION_Y_SEPARATION    Vertical spacing between sibling systems (default 60)\n\
  POLL_INTERVAL_SECONDS    Re-sync every N seconds; 0 runs once (default 0)\n\
  REMORA_DRY_RUN           Same as --dry-run when set to 1/true/yes\n\
  RUST_LOG                 Log filter (default info)\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--dry-run" => args.dry_run = true,
            "--once" => args.once = true,
            _ => return Err(CliError::Usage(usage())),
        }
    }
    Ok(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One full sync: fetch, build, compare, delete stale, submit.
fn sync_once(
    config: &Config,
    tripwire: &TripwireClient,
    wanderer: &WandererClient,
) -> Result<(), CliError> {
    let wormholes = tripwire.wormholes()?;
    let signatures = tripwire.signatures()?;
    info!(
        "fetched {} signatures and {} wormholes from Tripwire",
        signatures.len(),
        wormholes.len()
    );

    let mut options = MapOptions::new(config.home_system_id);
    options.x_separation = config.x_separation;
    options.y_separation = config.y_separation;
    let envelope = synthesize_map(&signatures, &wormholes, &options);
    info!(
        "built chain map with {} systems and {} connections",
        envelope.data.systems.len(),
        envelope.data.connections.len()
    );

    // Dry runs print the snapshot to stdout; logs stay on stderr.
    if config.dry_run {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &envelope)?;
        println!();
        return Ok(());
    }

    let current = wanderer.systems_and_connections()?;
    if !has_changes(&current, &envelope) {
        info!("map is unchanged, nothing to submit");
        return Ok(());
    }

    let delete = diff_envelopes(&current, &envelope);
    if !delete.system_ids.is_empty() || !delete.connection_ids.is_empty() {
        info!(
            "removing {} stale systems and {} stale connections",
            delete.system_ids.len(),
            delete.connection_ids.len()
        );
        wanderer.delete_systems_and_connections(&delete)?;
    }

    let outcome = wanderer.submit_systems_and_connections(&envelope)?;
    info!(
        "submitted snapshot: systems {} created / {} updated, connections {} created / {} updated",
        outcome.data.systems.created,
        outcome.data.systems.updated,
        outcome.data.connections.created,
        outcome.data.connections.updated
    );
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = Config::load()?;
    if args.dry_run {
        config.dry_run = true;
    }

    let tripwire = TripwireClient::new(&config);
    let wanderer = WandererClient::new(&config);

    if args.once || config.poll_interval_seconds == 0 {
        return sync_once(&config, &tripwire, &wanderer);
    }

    let interval = Duration::from_secs(config.poll_interval_seconds);
    loop {
        if let Err(err) = sync_once(&config, &tripwire, &wanderer) {
            error!("sync failed: {err}");
        }
        std::thread::sleep(interval);
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(flags: &[&str]) -> Vec<String> {
        std::iter::once("remora-cli")
            .chain(flags.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_flags_parse_to_defaults() {
        let args = parse_args(&argv(&[])).unwrap();
        assert!(!args.dry_run);
        assert!(!args.once);
    }

    #[test]
    fn flags_are_recognized() {
        let args = parse_args(&argv(&["--dry-run"])).unwrap();
        assert!(args.dry_run);

        let args = parse_args(&argv(&["--once"])).unwrap();
        assert!(args.once);

        let args = parse_args(&argv(&["--dry-run", "--once"])).unwrap();
        assert!(args.dry_run && args.once);
    }

    #[test]
    fn help_and_unknown_flags_yield_usage() {
        assert!(matches!(
            parse_args(&argv(&["--help"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(parse_args(&argv(&["-h"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(&argv(&["--frobnicate"])),
            Err(CliError::Usage(_))
        ));
    }
}

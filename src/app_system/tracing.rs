use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: this crate at `info`, dependencies at `warn`.
pub const DEFAULT_FILTER: &str = "warn,people_roster=info";

/// Installs the global subscriber once for the whole process.
///
/// ```bash
/// RUST_LOG=people_roster=debug cargo run
/// RUST_LOG=people_roster::optimistic=debug,people_roster::actor_framework=warn cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(true)
        .compact()
        .init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

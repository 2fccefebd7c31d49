use tracing_subscriber::EnvFilter;

pub const STATE_TARGET: &str = "state_snapshot";
pub const CLI_TARGET: &str = "droplinked_state";

/// Logs to stderr at INFO unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _result = tracing::subscriber::set_global_default(subscriber);
}

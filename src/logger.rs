use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REQPROBE_LOG";

/// Installs the stderr subscriber. `REQPROBE_LOG`, then `RUST_LOG`, overrides
/// the level chosen by `--verbose`. Calls after the first are no-ops.
pub fn init_logging(verbose: bool) {
    let env_var = if std::env::var_os(LOG_ENV).is_some() {
        LOG_ENV
    } else {
        EnvFilter::DEFAULT_ENV
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .with_env_var(env_var)
        .from_env_lossy();

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(err) = installed {
        tracing::debug!("Keeping existing subscriber: {}", err);
    }
}

const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

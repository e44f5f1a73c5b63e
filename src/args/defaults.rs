pub(crate) const DEFAULT_USER_AGENT: &str = concat!("reqprobe/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["reqprobe.toml", "reqprobe.json"];

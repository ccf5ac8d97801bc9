use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_DIRECTIVE: &str = "chat_reader=info";

/// Config file looked up in the working directory when no path is given
pub const LOCAL_CONFIG_FILENAME: &str = "chatreader.toml";

/// Resolve which config file to load, if any
///
/// An explicit path always wins. Otherwise `./chatreader.toml` is used when present, then
/// `<config dir>/chat-reader/config.toml`. Returns `None` when nothing exists, meaning defaults apply.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_config_path_in(explicit, Path::new("."), dirs::config_dir().as_deref())
}

pub(crate) fn resolve_config_path_in(
    explicit: Option<&Path>,
    working_dir: &Path,
    config_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = working_dir.join(LOCAL_CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    config_dir.map(|dir| dir.join("chat-reader").join("config.toml")).filter(|p| p.is_file())
}

/// Build the log filter from the value of `RUST_LOG`
///
/// A usable `RUST_LOG` replaces the default entirely.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

pub mod environment;
pub mod ordered_set;
pub mod paths;

pub use environment::{DEFAULT_LOG_DIRECTIVE, log_filter, resolve_config_path};
pub use ordered_set::OrderedSet;
pub use paths::{
    MAX_BACKUP_SIZE_BYTES, MAX_CONFIG_SIZE_BYTES, format_path_with_tilde, validate_file_size,
    validate_path_not_symlink,
};

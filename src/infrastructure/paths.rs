//! Path utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// Returns the data directory for zapprove output (trace files).
///
/// Located at `/host/.local/share/zellij/zapprove` in the sandbox. `/host`
/// points to the cwd of the last focused terminal, which is usually the
/// user's home directory, so on the host this is typically
/// `~/.local/share/zellij/zapprove`.
///
/// # Examples
///
/// ```
/// use zapprove::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/zapprove"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zapprove")
}

/// Expands a leading tilde to the sandbox `/host` prefix.
///
/// Used for the `seed_file` and `theme_file` configuration values.
///
/// # Examples
///
/// ```
/// use zapprove::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/agents/queue.json"), "/host/agents/queue.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("~user/file"), "~user/file");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

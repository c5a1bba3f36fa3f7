//! Path handling for the Zellij plugin sandbox, where `~` is mounted at `/host`.

use std::path::PathBuf;

/// Directory holding the plugin's trace output.
///
/// ```rust
/// use knowledgelink::infrastructure::data_dir;
///
/// assert!(data_dir().ends_with("knowledgelink"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("knowledgelink")
}

/// OTLP JSON trace file inside [`data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join("knowledgelink-otlp.json")
}

/// Maps a leading `~` to the sandbox mount of the home directory.
///
/// Other paths are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host() {
        assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert_eq!(trace_file().parent(), Some(data_dir().as_path()));
    }
}

//! Resolving external executables.

use std::env;
use std::path::{Path, PathBuf};

/// Transcoder used for every decode and encode.
pub const FFMPEG: &str = "ffmpeg";

/// macOS-only encoder for the CAF variant of the aiff export.
pub const AFCONVERT: &str = "afconvert";

/// Resolve a tool from an optional configured path, falling back to `PATH`.
///
/// A configured path that is not an existing file resolves to `None`; it is
/// not silently replaced by whatever `PATH` holds.
pub fn locate_tool(configured: Option<&str>, tool: &str) -> Option<PathBuf> {
    match configured.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            let path = Path::new(path);
            if path.is_file() {
                Some(path.to_path_buf())
            } else {
                tracing::debug!("Configured {} path does not exist: {}", tool, path.display());
                None
            }
        }
        None => find_in_path(tool),
    }
}

/// Search `PATH` for an executable named `tool`.
pub fn find_in_path(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn configured_path_must_exist() {
        assert!(locate_tool(Some("/nonexistent/bin/ffmpeg"), FFMPEG).is_none());
    }

    #[test]
    fn configured_path_is_used_verbatim() {
        let dir = tempdir().unwrap();
        let fake = dir.path().join("my-ffmpeg");
        std::fs::write(&fake, b"").unwrap();

        let found = locate_tool(Some(fake.to_str().unwrap()), FFMPEG);
        assert_eq!(found, Some(fake));
    }

    #[test]
    fn unknown_tool_is_not_on_path() {
        assert!(find_in_path("definitely-not-a-real-tool-3f9a").is_none());
    }
}

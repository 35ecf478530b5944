//! Finding the goosed executable the chat client talks to.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("Could not find {executable} binary in any of the expected locations: {searched}")]
    NotFound { executable: String, searched: String },
}

/// Where the client is running from
#[derive(Debug, Clone)]
pub enum AppLayout {
    /// Running from a source checkout
    Development { cwd: PathBuf },
    /// Running from an installed bundle
    Packaged {
        resources: PathBuf,
        app: PathBuf,
        exe: PathBuf,
    },
}

pub fn executable_name(is_windows: bool) -> &'static str {
    if is_windows {
        "goosed.exe"
    } else {
        "goosed"
    }
}

/// Every place goosed may live for this layout, most likely first
pub fn candidate_paths(layout: &AppLayout, executable: &str, is_windows: bool) -> Vec<PathBuf> {
    match layout {
        AppLayout::Development { cwd } => vec![
            cwd.join("src").join("bin").join(executable),
            cwd.join("bin").join(executable),
            cwd.join("..").join("..").join("target").join("debug").join(executable),
            cwd.join("..").join("..").join("target").join("release").join(executable),
        ],
        AppLayout::Packaged {
            resources,
            app,
            exe,
        } => {
            let mut paths = vec![
                resources.join("bin").join(executable),
                app.join("resources").join("bin").join(executable),
            ];
            if is_windows {
                paths.push(resources.join(executable));
                paths.push(app.join("resources").join(executable));
                paths.push(exe.join("..").join("bin").join(executable));
            }
            paths
        }
    }
}

/// The first candidate that is a regular file
pub fn locate(executable: &str, candidates: &[PathBuf]) -> Result<PathBuf, SidecarError> {
    for candidate in candidates {
        match fs::metadata(candidate) {
            Ok(meta) if meta.is_file() => {
                return Ok(fs::canonicalize(candidate).unwrap_or_else(|_| candidate.clone()));
            }
            Ok(_) => tracing::error!(
                "Path exists but is not a regular file: {}",
                candidate.display()
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::error!("Error checking path {}: {}", candidate.display(), e),
        }
    }

    Err(SidecarError::NotFound {
        executable: executable.to_string(),
        searched: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

pub fn find_goosed(layout: &AppLayout) -> Result<PathBuf, SidecarError> {
    let is_windows = cfg!(windows);
    let executable = executable_name(is_windows);
    locate(executable, &candidate_paths(layout, executable, is_windows))
}

/// Expand a leading `~` to the home directory. Paths without one, or when no
/// home directory is known, come back unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    match dirs::home_dir() {
        Some(home) => expand_tilde_with(path, &home, cfg!(windows)),
        None => PathBuf::from(path),
    }
}

fn expand_tilde_with(path: &str, home: &Path, is_windows: bool) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    if path.starts_with("~/") || (is_windows && path.starts_with("~\\")) {
        return home.join(&path[2..]);
    }
    match path.strip_prefix('~') {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_development_candidates() {
        let layout = AppLayout::Development {
            cwd: PathBuf::from("/work/ui/desktop"),
        };
        let paths = candidate_paths(&layout, "goosed", false);
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0], PathBuf::from("/work/ui/desktop/src/bin/goosed"));
        assert_eq!(
            paths[3],
            PathBuf::from("/work/ui/desktop/../../target/release/goosed")
        );
    }

    #[test]
    fn test_packaged_candidates_add_windows_fallbacks() {
        let layout = AppLayout::Packaged {
            resources: PathBuf::from("/app/res"),
            app: PathBuf::from("/app"),
            exe: PathBuf::from("/app/goose"),
        };
        assert_eq!(candidate_paths(&layout, "goosed", false).len(), 2);
        let windows = candidate_paths(&layout, "goosed.exe", true);
        assert_eq!(windows.len(), 5);
        assert_eq!(windows[2], PathBuf::from("/app/res/goosed.exe"));
    }

    #[test]
    fn test_locate_skips_directories() {
        let dir = tempdir().unwrap();
        let cwd = dir.path().join("ui").join("desktop");
        fs::create_dir_all(cwd.join("src").join("bin").join("goosed")).unwrap();
        fs::create_dir_all(cwd.join("bin")).unwrap();
        fs::write(cwd.join("bin").join("goosed"), "").unwrap();

        let layout = AppLayout::Development { cwd: cwd.clone() };
        let candidates = candidate_paths(&layout, "goosed", false);
        let found = locate("goosed", &candidates).unwrap();
        assert_eq!(
            found,
            fs::canonicalize(cwd.join("bin").join("goosed")).unwrap()
        );
    }

    #[test]
    fn test_locate_reports_every_candidate() {
        let dir = tempdir().unwrap();
        let candidates = vec![dir.path().join("a"), dir.path().join("b")];
        let err = locate("goosed", &candidates).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Could not find goosed binary"));
        assert!(message.contains(&dir.path().join("b").display().to_string()));
    }

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/home/goose");
        assert_eq!(expand_tilde_with("~", home, false), PathBuf::from("/home/goose"));
        assert_eq!(
            expand_tilde_with("~/projects", home, false),
            PathBuf::from("/home/goose/projects")
        );
        assert_eq!(
            expand_tilde_with("~projects", home, false),
            PathBuf::from("/home/goose/projects")
        );
        assert_eq!(
            expand_tilde_with("/etc/hosts", home, false),
            PathBuf::from("/etc/hosts")
        );
        assert_eq!(
            expand_tilde_with("~\\docs", home, true),
            home.join("docs")
        );
    }
}

use std::{env, io, path::PathBuf};

use anyhow::{anyhow, Result};

const APPLICATION_DIR: &str = "timeclock";

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        fn state_home() -> Result<PathBuf> {
            env::var("APPDATA")
                .map(PathBuf::from)
                .map_err(|_| anyhow!("APPDATA should be present on Windows"))
        }
    } else {
        fn state_home() -> Result<PathBuf> {
            env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .map_err(|_| anyhow!("Couldn't find neither XDG_STATE_HOME nor HOME"))
        }
    }
}

/// Resolves the directory attendance data is kept in and makes sure it exists.
/// By default that's $XDG_STATE_HOME/timeclock or $HOME/.local/state/timeclock
/// (%APPDATA%\timeclock on Windows).
pub fn create_application_default_path() -> Result<PathBuf> {
    let mut path = state_home()?;
    path.push(APPLICATION_DIR);
    ensure_dir(path)
}

pub fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::ensure_dir;

    #[test]
    fn test_ensure_dir_nested() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a/b/c");
        let created = ensure_dir(nested.clone())?;
        assert_eq!(created, nested);
        assert!(nested.is_dir());
        ensure_dir(nested.clone())?;
        Ok(())
    }
}

//! Interactive display of the saved figure
//!
//! Hands the file to the platform's default image viewer. This depends on a
//! desktop session, so callers treat failure as a warning.

use crate::scaling::{ChartError, Result};
use std::path::Path;
use std::process::Command;

/// Build the platform opener command for a file
pub fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` in the default viewer without waiting for it to close
pub fn open_in_viewer(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ChartError::Viewer(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let mut cmd = viewer_command(path);
    log::debug!("Launching viewer: {:?}", cmd);
    cmd.spawn().map_err(|e| {
        ChartError::Viewer(format!(
            "failed to launch {:?}: {}",
            cmd.get_program(),
            e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_targets_file() {
        let path = Path::new("analisis_workers.png");
        let cmd = viewer_command(path);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().copied(), Some(path.as_os_str()));

        #[cfg(target_os = "linux")]
        assert_eq!(cmd.get_program(), "xdg-open");
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_in_viewer(Path::new("/nonexistent/figure.png")).unwrap_err();
        assert!(matches!(err, ChartError::Viewer(_)));
    }
}

use std::io::{BufRead, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::error::Result;

/// Presents a rendered chart and returns once the user is done with it.
pub trait Viewer {
    fn show(&self, svg: &str) -> Result<()>;
}

/// Opens the chart with the desktop's default handler for SVG files and
/// blocks until Enter is pressed. The chart lives in a temporary file that is
/// removed afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn show(&self, svg: &str) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("revenue-")
            .suffix(".svg")
            .tempfile()?;
        file.write_all(svg.as_bytes())?;
        file.flush()?;

        let path = file.path();
        match open_command(path).stdout(Stdio::null()).stderr(Stdio::null()).status() {
            Ok(status) if status.success() => info!("chart opened: {}", path.display()),
            Ok(status) => warn!("viewer exited with {}, chart is at {}", status, path.display()),
            Err(e) => warn!("failed to launch viewer ({}), chart is at {}", e, path.display()),
        }

        print!("Press Enter to close the chart...");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;

        file.close()?;
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use tracing::debug;

/// The OS-facing half of action dispatch. Every method starts something and
/// returns without waiting for it.
pub trait Launcher {
    fn open_url(&self, url: &str) -> io::Result<()>;

    /// Opens a directory in the platform file browser.
    fn open_directory(&self, path: &Path) -> io::Result<()>;

    /// Opens a file with its default application.
    fn open_file(&self, path: &Path) -> io::Result<()>;

    /// Runs `program` with `args` without a shell. Fails with
    /// [`io::ErrorKind::NotFound`] when the program cannot be resolved.
    fn spawn_direct(&self, program: &str, args: &[String]) -> io::Result<()>;

    /// Runs `command` through the platform shell.
    fn spawn_shell(&self, command: &str) -> io::Result<()>;
}

/// Launches through the real OS facilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }

    fn open_directory(&self, path: &Path) -> io::Result<()> {
        let mut cmd = if cfg!(target_os = "windows") {
            Command::new("explorer")
        } else {
            Command::new(platform_opener())
        };
        cmd.arg(path);
        detach(cmd)
    }

    fn open_file(&self, path: &Path) -> io::Result<()> {
        let cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new(platform_opener());
            cmd.arg(path);
            cmd
        };
        detach(cmd)
    }

    fn spawn_direct(&self, program: &str, args: &[String]) -> io::Result<()> {
        let resolved = which::which(program)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        let mut cmd = Command::new(resolved);
        cmd.args(args);
        detach(cmd)
    }

    fn spawn_shell(&self, command: &str) -> io::Result<()> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(command);
        detach(cmd)
    }
}

fn platform_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Spawns without waiting. A helper thread reaps the child so it never
/// lingers as a zombie.
fn detach(mut cmd: Command) -> io::Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    let child = cmd.spawn()?;
    debug!(pid = child.id(), "spawned");
    reap(child);
    Ok(())
}

fn reap(mut child: Child) {
    let spawned = std::thread::Builder::new()
        .name("edge-dock-reaper".into())
        .spawn(move || {
            let pid = child.id();
            match child.wait() {
                Ok(status) => debug!(pid, %status, "launched process exited"),
                Err(err) => debug!(pid, error = %err, "failed to wait on launched process"),
            }
        });
    if let Err(err) = spawned {
        debug!(error = %err, "could not start reaper thread");
    }
}

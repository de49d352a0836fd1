use crate::error::launch::LaunchError;
use crate::error::shutdown::ShutdownError;
use crate::launcher::DriverArguments;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child as TokioChild;
use tokio::process::Command as TokioCommand;
use tokio::spawn as TokioSpawn;

/// Handle to the spawned driver.
///
/// Owned by the lifecycle coordinator. Dropping the handle kills the child, so a
/// crashing bridge never leaves an orphaned driver behind.
#[derive(Debug)]
pub struct DriverProcess {
    child: TokioChild,
    pid: Option<u32>,
    killed: bool,
}

impl DriverProcess {
    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    /// Forcibly kill the driver and reap it.
    ///
    /// Only the first call sends a signal. Later calls return `Ok(false)`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - This call killed the process
    /// * `Ok(false)` - The process was already killed
    /// * `Err(ShutdownError::Kill)` - The kill signal could not be delivered
    pub async fn kill(&mut self) -> Result<bool, ShutdownError> {
        if self.killed {
            debug!("Driver (PID: {:?}) already killed", self.pid);
            return Ok(false);
        }
        self.killed = true;

        self.child.kill().await.map_err(|e| ShutdownError::Kill {
            message: format!("Failed to kill driver (PID: {:?}): {e}", self.pid),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        info!("Driver (PID: {:?}) killed", self.pid);
        Ok(true)
    }

    /// Exit status if the driver has already exited on its own.
    pub fn try_exit_status(&mut self) -> Option<ExitStatus> {
        self.child.try_wait().ok().flatten()
    }
}

pub(crate) fn build_driver_command(driver_path: &Path, args: &DriverArguments) -> TokioCommand {
    let mut cmd = TokioCommand::new(driver_path);
    cmd.args(args.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Spawn the driver with rewritten arguments. Does not wait for it.
///
/// Must be called from within a Tokio runtime: the driver's stdout and stderr are
/// forwarded to the log by background tasks.
///
/// # Errors
///
/// Returns [`LaunchError::Spawn`] if the binary cannot be started (missing path,
/// permission denied, not executable).
#[track_caller]
pub fn launch(driver_path: &Path, args: &DriverArguments) -> Result<DriverProcess, LaunchError> {
    debug!("Spawning {} {:?}", driver_path.display(), args.args());

    let mut child = build_driver_command(driver_path, args)
        .spawn()
        .map_err(|e| LaunchError::Spawn {
            message: format!("Failed to spawn {}: {e}", driver_path.display()),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

    let pid = child.id();
    info!("Spawned {} (PID: {pid:?})", driver_path.display());

    if let Some(stdout) = child.stdout.take() {
        TokioSpawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("Driver stdout: {line}");
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        TokioSpawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!("Driver stderr: {line}");
            }
        });
    }

    Ok(DriverProcess {
        child,
        pid,
        killed: false,
    })
}

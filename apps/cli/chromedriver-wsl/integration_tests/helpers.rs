//! Test helpers for driving the bridge end to end.

use bridge_core::CONFIG_FILE_NAME;

use std::fs;
use std::path::Path;

use tempfile::{TempDir, tempdir};
use tokio::net::TcpListener;

/// Test helper: A directory holding `chromedriver_wsl_config.json` with `contents`.
pub fn config_dir(contents: &str) -> TempDir {
    let dir = tempdir().expect("temp dir");
    write_config(dir.path(), contents);
    dir
}

pub fn write_config(dir: &Path, contents: &str) {
    fs::write(dir.join(CONFIG_FILE_NAME), contents).expect("write config");
}

/// Test helper: A localhost port nothing is listening on right now.
pub async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port binds");
    listener.local_addr().expect("bound address").port()
}

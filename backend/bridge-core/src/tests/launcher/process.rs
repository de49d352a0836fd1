// Unit tests for launcher private functions
// Integration tests for public API are in integration_tests/launcher/

use crate::launcher::process::build_driver_command;
use crate::launcher::rewrite_arguments;

use std::ffi::OsStr;
use std::path::Path;

/// **VALUE**: Verifies the spawned program is the configured driver path, verbatim.
///
/// **WHY THIS MATTERS**: The path usually points through `/mnt/c/...` at a Windows
/// executable. Any normalization would stop WSL interop from finding it.
#[test]
fn given_driver_path_when_build_driver_command_called_then_uses_path_as_program() {
    // GIVEN: A Windows driver path and rewritten arguments
    let path = Path::new("/mnt/c/tools/chromedriver.exe");
    let args = rewrite_arguments(["--verbose"], "9515", "172.20.1.5").unwrap();

    // WHEN: Building the command
    let cmd = build_driver_command(path, &args);

    // THEN: Program is the path as given
    assert_eq!(cmd.as_std().get_program(), path.as_os_str());
}

/// **VALUE**: Verifies the rewritten arguments reach the command in order.
///
/// **BUG THIS CATCHES**: Would catch the command being built from the raw arguments
/// instead of the rewritten ones, which would leave the driver on the bridge's own port.
#[test]
fn given_rewritten_arguments_when_build_driver_command_called_then_passes_them_in_order() {
    // GIVEN: Arguments with a port to rewrite
    let args = rewrite_arguments(["--port=4444", "--verbose"], "9515", "172.20.1.5").unwrap();

    // WHEN: Building the command
    let cmd = build_driver_command(Path::new("chromedriver.exe"), &args);

    // THEN: Command arguments match the rewritten list
    let actual: Vec<&OsStr> = cmd.as_std().get_args().collect();
    let expected: Vec<&OsStr> = [
        "--port=9515",
        "--verbose",
        "--allowed-ips",
        "172.20.1.5",
    ]
    .iter()
    .map(OsStr::new)
    .collect();
    assert_eq!(actual, expected);
}

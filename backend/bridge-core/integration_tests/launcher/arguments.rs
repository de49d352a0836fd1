use bridge_core::error::launch::LaunchError;
use bridge_core::launcher::rewrite_arguments;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

/// **VALUE**: Verifies the canonical rewrite: port swapped, allow-list appended.
///
/// **WHY THIS MATTERS**: The WebDriver client starts the bridge exactly like it would start
/// chromedriver. The `--port=` it passes is where it will connect, so the bridge must listen
/// there while the real driver listens on the host port.
#[test]
fn given_port_argument_when_rewriting_then_listen_port_taken_and_host_port_substituted() {
    // GIVEN: A typical Selenium invocation
    let raw = ["--port=4444", "--verbose"];

    // WHEN: Rewriting for host port 9515
    let rewritten = rewrite_arguments(raw, "9515", "172.20.1.5").unwrap();

    // THEN: Bridge listens on 4444, driver gets 9515 and the allow-list
    assert_eq!(rewritten.listen_port(), 4444);
    assert_eq!(
        rewritten.args(),
        strings(&["--port=9515", "--verbose", "--allowed-ips", "172.20.1.5"])
    );
}

#[test]
fn given_no_port_argument_when_rewriting_then_defaults_to_9515() {
    let rewritten = rewrite_arguments(["--log-level=INFO"], "9600", "10.0.0.2").unwrap();

    assert_eq!(rewritten.listen_port(), 9515);
    assert_eq!(
        rewritten.args(),
        strings(&["--log-level=INFO", "--allowed-ips", "10.0.0.2"])
    );
}

#[test]
fn given_no_arguments_when_rewriting_then_only_allow_list_passed() {
    let rewritten = rewrite_arguments(Vec::<String>::new(), "9515", "172.20.1.5").unwrap();

    assert_eq!(rewritten.listen_port(), 9515);
    assert_eq!(rewritten.args(), strings(&["--allowed-ips", "172.20.1.5"]));
}

/// **VALUE**: Repeated `--port=` flags are all rewritten and the last value wins.
///
/// **BUG THIS CATCHES**: Would catch the first occurrence leaking the caller's port through
/// to the driver, which would then collide with the bridge's own listener.
#[test]
fn given_repeated_port_arguments_when_rewriting_then_last_wins_and_all_rewritten() {
    let raw = ["--port=1111", "--silent", "--port=2222"];

    let rewritten = rewrite_arguments(raw, "9515", "172.20.1.5").unwrap();

    assert_eq!(rewritten.listen_port(), 2222);
    assert_eq!(
        rewritten.args(),
        strings(&[
            "--port=9515",
            "--silent",
            "--port=9515",
            "--allowed-ips",
            "172.20.1.5"
        ])
    );
}

/// **VALUE**: Only the exact `--port=` prefix is treated as the port flag.
///
/// **BUG THIS CATCHES**: Would catch a prefix match on `--port` swallowing lookalike flags
/// such as `--port-server=` or a separated `--port 4444`.
#[test]
fn given_lookalike_port_flags_when_rewriting_then_passed_through_unchanged() {
    let raw = ["--port-server=7777", "--port", "4444", "-port=5555"];

    let rewritten = rewrite_arguments(raw, "9515", "172.20.1.5").unwrap();

    assert_eq!(rewritten.listen_port(), 9515);
    assert_eq!(
        &rewritten.args()[..4],
        strings(&["--port-server=7777", "--port", "4444", "-port=5555"]).as_slice()
    );
}

#[test]
fn given_arguments_when_rewriting_then_output_is_input_plus_two() {
    let raw = strings(&["--a", "--port=4444", "--b=c", "positional", "--port=4445"]);

    let rewritten = rewrite_arguments(raw.clone(), "9515", "172.20.1.5").unwrap();

    assert_eq!(rewritten.args().len(), raw.len() + 2);
    let tail = &rewritten.args()[raw.len()..];
    assert_eq!(tail, strings(&["--allowed-ips", "172.20.1.5"]).as_slice());
}

#[test]
fn given_unknown_local_address_when_rewriting_then_empty_allow_list_appended() {
    let rewritten = rewrite_arguments(["--port=4444"], "9515", "").unwrap();

    assert_eq!(
        rewritten.args(),
        strings(&["--port=9515", "--allowed-ips", ""])
    );
}

#[test]
fn given_invalid_listen_port_when_rewriting_then_returns_validation_error() {
    for raw in ["--port=", "--port=abc", "--port=0", "--port=70000"] {
        let result = rewrite_arguments([raw], "9515", "172.20.1.5");

        assert!(
            matches!(result, Err(LaunchError::Validation { .. })),
            "Should reject {raw}"
        );
    }
}

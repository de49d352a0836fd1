use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` records the exact call site.
///
/// **WHY THIS MATTERS**: Every startup diagnostic the bridge prints ends with a location.
/// When chromedriver fails to spawn on a user's machine, that location is the only pointer
/// back to the failing step.
///
/// **BUG THIS CATCHES**: Would catch if file, line, or column extraction from
/// `Location::caller()` breaks.
#[test]
fn given_call_site_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: The line the location is captured on
    let expected_line = line!() + 3;

    // WHEN: Creating ErrorLocation from caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert_eq!(location.line, expected_line, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` Display format.
///
/// **WHY THIS MATTERS**: Error messages are built as `"<Kind> Error: {message} {location}"`.
/// A format change makes every diagnostic harder to read.
///
/// **BUG THIS CATCHES**: Would catch if the Display implementation drops the brackets
/// or one of the three components.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A fixed ErrorLocation
    let location = ErrorLocation {
        file: "launcher/mod.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting as string
    let formatted = location.to_string();

    // THEN: Should produce "[file:line:column]"
    assert_eq!(formatted, "[launcher/mod.rs:42:7]");
}

/// **VALUE**: Verifies that `#[track_caller]` helpers report their caller's line.
///
/// **WHY THIS MATTERS**: Error constructors throughout bridge-core are `#[track_caller]`,
/// so the recorded location must be the failing call, not the constructor.
///
/// **BUG THIS CATCHES**: Would catch if location propagation through `#[track_caller]`
/// stops working, which would make every error point at the same helper line.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    // GIVEN: A helper function that captures location
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Capturing location from different call sites
    let loc1 = capture_location();
    let loc2 = capture_location();

    // THEN: Same file, sequential lines
    assert_eq!(loc1.file, loc2.file, "Should have same file");
    assert_eq!(loc1.line + 1, loc2.line, "Lines should be sequential");
}

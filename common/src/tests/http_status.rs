use crate::HttpStatusCode;

/// **VALUE**: Verifies the status class boundaries used to pick a log level for proxied responses.
///
/// **BUG THIS CATCHES**: Off-by-one range checks that would log a 502 from an unreachable
/// driver as a client error, or a 200 as a failure.
#[test]
fn given_boundary_codes_when_classified_then_each_lands_in_one_class() {
    let cases = [
        (199, false, false, false),
        (200, true, false, false),
        (299, true, false, false),
        (400, false, true, false),
        (404, false, true, false),
        (499, false, true, false),
        (500, false, false, true),
        (502, false, false, true),
        (600, false, false, false),
    ];

    for (code, success, client, server) in cases {
        let status = HttpStatusCode::from(code);
        assert_eq!(status.is_success(), success, "is_success for {code}");
        assert_eq!(status.is_client_error(), client, "is_client_error for {code}");
        assert_eq!(status.is_server_error(), server, "is_server_error for {code}");
    }
}

#[test]
fn given_status_when_displayed_then_prints_bare_code() {
    assert_eq!(HttpStatusCode(502).to_string(), "502");
}

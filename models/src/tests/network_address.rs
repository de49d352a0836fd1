use crate::NetworkAddressPair;

#[test]
fn given_unresolved_pair_when_checked_then_both_fields_empty() {
    let pair = NetworkAddressPair::unresolved();

    assert!(pair.local_address.is_empty());
    assert!(pair.host_address.is_empty());
    assert!(!pair.is_resolved());
}

/// **VALUE**: A pair with only one side filled is not usable.
///
/// **BUG THIS CATCHES**: Would catch `is_resolved()` checking just one field, which would let
/// an empty allow-list address through silently.
#[test]
fn given_half_filled_pair_when_checked_then_not_resolved() {
    assert!(!NetworkAddressPair::new("172.20.1.5", "").is_resolved());
    assert!(!NetworkAddressPair::new("", "172.20.0.1").is_resolved());
    assert!(NetworkAddressPair::new("172.20.1.5", "172.20.0.1").is_resolved());
}

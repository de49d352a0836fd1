/// The VM's own address and the Windows host address adjacent to it.
///
/// Both fields are dotted-quad IPv4 strings, or both empty when no usable
/// interface was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkAddressPair {
    pub local_address: String,
    pub host_address: String,
}

impl NetworkAddressPair {
    pub fn new(local_address: impl Into<String>, host_address: impl Into<String>) -> Self {
        Self {
            local_address: local_address.into(),
            host_address: host_address.into(),
        }
    }

    /// The pair reported when resolution found nothing.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        !self.local_address.is_empty() && !self.host_address.is_empty()
    }
}

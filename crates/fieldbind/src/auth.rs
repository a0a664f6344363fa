//! Session authorization.
//!
//! One coarse capability, resolved once when the session starts and passed
//! explicitly into the controller. Call sites never consult ambient storage.

/// Coarse permission level for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Mutate,
    ReadOnly,
    Deny,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Mutate => "mutate",
            Capability::ReadOnly => "read-only",
            Capability::Deny => "deny",
        }
    }
}

/// The capability a session was resolved to.
///
/// When mutation is disallowed the controller refuses every mutating event
/// and the read-only view is the only active surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationContext {
    capability: Capability,
}

impl AuthorizationContext {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn can_mutate(&self) -> bool {
        self.capability == Capability::Mutate
    }

    pub fn can_view(&self) -> bool {
        self.capability != Capability::Deny
    }
}

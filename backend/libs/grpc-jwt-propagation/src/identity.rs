//! Per-call identity
//!
//! A [`CallIdentity`] is the only thing the server interceptor leaves behind
//! in a request. It is keyed by type in the request extensions, so nothing
//! outside this crate can collide with it, and it can only be constructed
//! here.

use crypto_core::SubjectId;

/// Subject identifier attached to a single call after token validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallIdentity {
    subject: SubjectId,
}

impl CallIdentity {
    pub(crate) fn new(subject: SubjectId) -> Self {
        Self { subject }
    }

    /// Authenticated user ID
    pub fn subject(&self) -> SubjectId {
        self.subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_round_trip() {
        let identity = CallIdentity::new(42);
        assert_eq!(identity.subject(), 42);
    }
}

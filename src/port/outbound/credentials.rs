//! Dashboard credential verification port.

/// Checks a username/password pair.
///
/// The dashboard only needs a yes/no answer, so directory-backed verifiers
/// can be plugged in without touching the routing code.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

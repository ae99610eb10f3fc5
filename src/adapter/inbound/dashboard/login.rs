//! Login form handling.

use serde::Deserialize;

use crate::domain::navigation::login_outcome;
use crate::domain::{LoginOutcome, LoginTrigger};
use crate::port::CredentialVerifier;

/// Verifier accepting one configured username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("test", "test")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Submitted login form.
///
/// `trigger` names the widget that submitted the form: `click` for the
/// button, `username` or `password` for enter in a field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub trigger: Option<String>,
}

impl LoginForm {
    #[must_use]
    pub fn trigger(&self) -> LoginTrigger {
        let mut trigger = LoginTrigger::default();
        match self.trigger.as_deref() {
            Some("click") => trigger.clicks = 1,
            Some("password") => trigger.password_submits = 1,
            Some("username") => trigger.username_submits = 1,
            _ => {}
        }
        trigger
    }
}

/// Check a submitted form against `verifier`.
///
/// Credentials are not consulted when nothing triggered the submission.
#[must_use]
pub fn evaluate(verifier: &dyn CredentialVerifier, form: &LoginForm) -> LoginOutcome {
    let trigger = form.trigger();
    let accepted = trigger.fired() && verifier.verify(&form.username, &form.password);
    login_outcome(trigger, &form.username, accepted)
}

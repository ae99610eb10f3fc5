//! Dashboard view routing.
//!
//! Pure decisions over (path, authenticated). The dashboard adapter applies
//! the resulting [`Route`] to the session and renders the chosen [`View`].

/// Path of the login form.
pub const LOGIN_PATH: &str = "/login";
/// Path reached after a successful login.
pub const SUCCESS_PATH: &str = "/success";
/// Path that ends the session.
pub const LOGOUT_PATH: &str = "/logout";

/// Sentinel identity shown while nobody is logged in.
pub const LOGGED_OUT_IDENTITY: &str = "loggedout";

/// Message shown after rejected credentials.
pub const LOGIN_ERROR_MESSAGE: &str = "Incorrect username or password";

/// Page body selected for a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Login form with an optional inline error.
    Login { error: Option<String> },
    /// Main dashboard with the two charts.
    Dashboard,
    /// Shown at `/success` without an authenticated session.
    LoginFailed,
    /// Shown after an explicit logout.
    LoggedOut,
    /// Placeholder while the browser follows a redirect to the login form.
    Redirecting,
}

/// Result of routing one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub view: View,
    pub redirect: Option<&'static str>,
    /// The session must be logged out before rendering.
    pub logout: bool,
}

impl Route {
    fn show(view: View) -> Self {
        Self {
            view,
            redirect: None,
            logout: false,
        }
    }

    fn redirect(view: View, target: &'static str) -> Self {
        Self {
            view,
            redirect: Some(target),
            logout: false,
        }
    }
}

/// Decide what to render for `path` given the session's login flag.
#[must_use]
pub fn route(path: &str, authenticated: bool) -> Route {
    match (path, authenticated) {
        (LOGIN_PATH, _) => Route::show(View::Login { error: None }),
        (SUCCESS_PATH, true) => Route::show(View::Dashboard),
        (SUCCESS_PATH, false) => Route::show(View::LoginFailed),
        (LOGOUT_PATH, true) => Route {
            view: View::LoggedOut,
            redirect: None,
            logout: true,
        },
        (LOGOUT_PATH, false) => Route::redirect(View::Login { error: None }, LOGIN_PATH),
        (_, true) => Route::show(View::Dashboard),
        (_, false) => Route::redirect(View::Redirecting, LOGIN_PATH),
    }
}

/// What triggered a login form callback.
///
/// Counters mirror the form widgets: button clicks and enter presses in the
/// password and username fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginTrigger {
    pub clicks: u32,
    pub password_submits: u32,
    pub username_submits: u32,
}

impl LoginTrigger {
    /// A single button click.
    #[must_use]
    pub fn click() -> Self {
        Self {
            clicks: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fired(&self) -> bool {
        self.clicks > 0 || self.password_submits > 0 || self.username_submits > 0
    }
}

/// Result of evaluating a login submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Identity to mark as logged in, if the credentials were accepted.
    pub authenticated_as: Option<String>,
    pub redirect: Option<&'static str>,
    pub message: String,
}

/// Evaluate a submission given whether the verifier accepted the credentials.
#[must_use]
pub fn login_outcome(trigger: LoginTrigger, username: &str, accepted: bool) -> LoginOutcome {
    if !trigger.fired() {
        return LoginOutcome {
            authenticated_as: None,
            redirect: None,
            message: String::new(),
        };
    }

    if accepted {
        LoginOutcome {
            authenticated_as: Some(username.to_string()),
            redirect: Some(SUCCESS_PATH),
            message: String::new(),
        }
    } else {
        LoginOutcome {
            authenticated_as: None,
            redirect: Some(LOGIN_PATH),
            message: LOGIN_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Header link shown on every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatus {
    pub link_label: &'static str,
    pub link_href: &'static str,
    /// Logged-in identity or [`LOGGED_OUT_IDENTITY`].
    pub identity: String,
}

/// Compute the header link for the current navigation.
///
/// On `/logout` the session is about to end, so the login link is shown even
/// while the session is still authenticated.
#[must_use]
pub fn user_status(path: &str, identity: Option<&str>) -> UserStatus {
    match identity {
        Some(user) if path != LOGOUT_PATH => UserStatus {
            link_label: "logout",
            link_href: LOGOUT_PATH,
            identity: user.to_string(),
        },
        _ => UserStatus {
            link_label: "login",
            link_href: LOGIN_PATH,
            identity: LOGGED_OUT_IDENTITY.to_string(),
        },
    }
}

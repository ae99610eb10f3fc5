//! Axum HTTP surface of the dashboard.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::navigation::LOGIN_PATH;
use crate::domain::{SessionId, View};
use crate::port::CredentialVerifier;

use super::login::{evaluate, LoginForm};
use super::refresh::{ChartCache, RefreshSchedule, Widget};
use super::router::SessionRouter;
use super::session::{cookie_value, SessionStore, SESSION_COOKIE};
use super::view::render_page;

/// Shared state of all dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    router: SessionRouter,
    verifier: Arc<dyn CredentialVerifier>,
    charts: Arc<ChartCache>,
    schedule: RefreshSchedule,
}

impl DashboardState {
    #[must_use]
    pub fn new(
        sessions: Arc<SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        charts: Arc<ChartCache>,
        schedule: RefreshSchedule,
    ) -> Self {
        Self {
            router: SessionRouter::new(sessions),
            verifier,
            charts,
            schedule,
        }
    }

    fn sessions(&self) -> &SessionStore {
        self.router.sessions()
    }

    fn session(&self, headers: &HeaderMap) -> Option<SessionId> {
        let cookie = headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| cookie_value(header, SESSION_COOKIE));
        self.sessions().resolve(cookie)
    }

    fn render(&self, session: Option<SessionId>, view: &View, path: &str) -> String {
        let nav = self.router.navigate(session, path);
        render_page(view, &nav.status, nav.flash.as_deref(), &self.schedule)
    }
}

/// Build the dashboard router.
pub fn build_router(state: DashboardState) -> Router {
    Router::new()
        .route("/login", get(page).post(submit_login))
        .route("/api/charts/allocation", get(allocation_chart))
        .route("/api/charts/performance", get(performance_chart))
        .fallback(page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the dashboard until the listener fails.
pub async fn serve(listener: TcpListener, state: DashboardState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(url = %format!("http://{addr}"), "Dashboard listening");
    }
    axum::serve(listener, build_router(state)).await
}

fn set_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, "Invalid session cookie header"),
    }
}

fn with_session(state: &DashboardState, id: SessionId, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        state.sessions().sign(id)
    );
    set_cookie(&mut response, &cookie);
    response
}

fn without_session(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    set_cookie(&mut response, &cookie);
    response
}

fn see_other(target: &'static str, body: String) -> Response {
    (StatusCode::SEE_OTHER, [(LOCATION, target)], Html(body)).into_response()
}

async fn page(State(state): State<DashboardState>, headers: HeaderMap, uri: Uri) -> Response {
    let session = state.session(&headers);
    let nav = state.router.navigate(session, uri.path());
    let body = render_page(&nav.route.view, &nav.status, nav.flash.as_deref(), &state.schedule);

    let response = match nav.route.redirect {
        Some(target) => see_other(target, body),
        None => Html(body).into_response(),
    };
    if nav.route.logout {
        without_session(response)
    } else {
        response
    }
}

async fn submit_login(
    State(state): State<DashboardState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let session = state.session(&headers);
    let outcome = evaluate(state.verifier.as_ref(), &form);

    // Login always issues a new id; a cookie presented before login stays anonymous
    let issued = if let Some(user) = &outcome.authenticated_as {
        info!(user = %user, "Dashboard login");
        Some(state.sessions().login(session, user.clone()))
    } else if !outcome.message.is_empty() {
        warn!(user = %form.username, "Rejected dashboard login");
        state
            .sessions()
            .set_flash(session, outcome.message.clone())
            .filter(|id| Some(*id) != session)
    } else {
        None
    };

    let response = match outcome.redirect {
        Some(target) => see_other(target, String::new()),
        None => Html(state.render(session, &View::Login { error: None }, LOGIN_PATH))
            .into_response(),
    };
    match issued {
        Some(id) => with_session(&state, id, response),
        None => response,
    }
}

fn chart(state: &DashboardState, headers: &HeaderMap, widget: Widget) -> Response {
    let authenticated = state
        .session(headers)
        .is_some_and(|id| state.sessions().is_authenticated(id));
    if !authenticated {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.charts.get(widget) {
        Some(cached) => Json(cached).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn allocation_chart(State(state): State<DashboardState>, headers: HeaderMap) -> Response {
    chart(&state, &headers, Widget::Allocation)
}

async fn performance_chart(State(state): State<DashboardState>, headers: HeaderMap) -> Response {
    chart(&state, &headers, Widget::Performance)
}

//! HTML rendering of dashboard views.
//!
//! Pages are single self-contained documents; the dashboard view polls the
//! chart endpoints and draws them client-side.

use std::fmt::Write as _;

use crate::domain::{UserStatus, View};

use super::refresh::RefreshSchedule;

/// Page title shown in the browser and the header.
pub const TITLE: &str = "FundLess Dashboard";

const STYLE: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; background: #f4f6f8; color: #1d2733; }
header { display: flex; justify-content: space-between; align-items: center; padding: 12px 24px; background: #1d2733; color: #fff; }
header a { color: #8fd3ff; margin-right: 8px; }
main { max-width: 1100px; margin: 24px auto; padding: 0 16px; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.card { background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.bar { height: 14px; background: #3d8bfd; border-radius: 3px; }
.error { color: #c62828; }
form label { display: block; margin-top: 8px; }
";

/// Escape text for HTML bodies and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn header(status: &UserStatus) -> String {
    format!(
        r#"<header><strong>{TITLE}</strong><span><a id="user-link" href="{href}">{label}</a><span id="user-name">{identity}</span></span></header>"#,
        href = status.link_href,
        label = status.link_label,
        identity = escape(&status.identity),
    )
}

fn login_form(error: Option<&str>) -> String {
    let mut body = String::from(
        r#"<div class="card"><h2>Please log in to continue:</h2>
<form id="login-form" method="post" action="/login">
<input type="hidden" name="trigger" id="trigger" value="click">
<label>Username <input name="username" id="uname-box" autocomplete="username"></label>
<label>Password <input name="password" id="pwd-box" type="password" autocomplete="current-password"></label>
<p><button type="submit" id="login-button">Login</button></p>
</form>"#,
    );
    if let Some(error) = error {
        let _ = write!(body, r#"<p class="error" id="output-state">{}</p>"#, escape(error));
    }
    body.push_str(
        r#"</div>
<script>
for (const [id, name] of [["uname-box", "username"], ["pwd-box", "password"]]) {
  document.getElementById(id).addEventListener("keydown", (e) => {
    if (e.key === "Enter") { document.getElementById("trigger").value = name; }
  });
}
document.getElementById("login-button").addEventListener("click", () => {
  document.getElementById("trigger").value = "click";
});
</script>"#,
    );
    body
}

fn dashboard(schedule: &RefreshSchedule) -> String {
    format!(
        r#"<div class="grid">
<div class="card"><h3>Allocation</h3><div id="allocation-chart">Loading...</div></div>
<div class="card"><h3>Performance</h3><div id="performance-chart">Loading...</div></div>
</div>
<script>
function draw(target, chart) {{
  const max = Math.max(...chart.points.map((p) => Number(p.value)), 1);
  const rows = chart.points.map((p) =>
    `<tr><td>${{p.label}}</td><td>${{Number(p.value).toFixed(2)}}</td>` +
    `<td style="width:60%"><div class="bar" style="width:${{100 * Number(p.value) / max}}%"></div></td></tr>`);
  document.getElementById(target).innerHTML =
    `<p>${{chart.title}}</p><table style="width:100%">${{rows.join("")}}</table>`;
}}
async function refresh(widget) {{
  const response = await fetch(`/api/charts/${{widget}}`);
  if (response.ok) {{
    const cached = await response.json();
    draw(`${{widget}}-chart`, cached.chart);
  }}
}}
for (const [widget, period] of [["allocation", {allocation}], ["performance", {performance}]]) {{
  refresh(widget);
  setInterval(() => refresh(widget), period);
}}
</script>"#,
        allocation = schedule.allocation.as_millis(),
        performance = schedule.performance.as_millis(),
    )
}

fn body(view: &View, flash: Option<&str>, schedule: &RefreshSchedule) -> String {
    match view {
        View::Login { error } => login_form(error.as_deref().or(flash)),
        View::Dashboard => dashboard(schedule),
        View::LoginFailed => format!(
            r#"<h2>Log in Failed. Please try again.</h2>{}<a href="/">Home</a>"#,
            login_form(flash)
        ),
        View::LoggedOut => {
            r#"<div class="card"><h2>You have been logged out - Please login</h2><a href="/">Home</a></div>"#
                .to_string()
        }
        View::Redirecting => r#"<p>Redirecting to login...</p>"#.to_string(),
    }
}

/// Render a complete page for `view`.
#[must_use]
pub fn render_page(
    view: &View,
    status: &UserStatus,
    flash: Option<&str>,
    schedule: &RefreshSchedule,
) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{TITLE}</title><style>{STYLE}</style></head>
<body>{header}<main>{body}</main></body>
</html>"#,
        header = header(status),
        body = body(view, flash, schedule),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::user_status;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn every_page_has_title_and_status() {
        let status = user_status("/", Some("alice"));
        let page = render_page(&View::Dashboard, &status, None, &RefreshSchedule::default());
        assert!(page.contains("<title>FundLess Dashboard</title>"));
        assert!(page.contains(r#"href="/logout">logout</a>"#));
        assert!(page.contains("alice"));
    }

    #[test]
    fn dashboard_polls_with_configured_periods() {
        let status = user_status("/", Some("test"));
        let page = render_page(&View::Dashboard, &status, None, &RefreshSchedule::default());
        assert!(page.contains(r#"["allocation", 20000]"#));
        assert!(page.contains(r#"["performance", 300000]"#));
    }

    #[test]
    fn login_form_shows_flash_message() {
        let status = user_status("/login", None);
        let page = render_page(
            &View::Login { error: None },
            &status,
            Some("Incorrect username or password"),
            &RefreshSchedule::default(),
        );
        assert!(page.contains("Incorrect username or password"));
        assert!(page.contains("loggedout"));
    }

    #[test]
    fn failed_login_page_embeds_the_form() {
        let status = user_status("/success", None);
        let page = render_page(&View::LoginFailed, &status, None, &RefreshSchedule::default());
        assert!(page.contains("Log in Failed. Please try again."));
        assert!(page.contains(r#"id="login-form""#));
    }

    #[test]
    fn redirecting_page_says_so() {
        let status = user_status("/x", None);
        let page = render_page(&View::Redirecting, &status, None, &RefreshSchedule::default());
        assert!(page.contains("Redirecting to login..."));
    }
}

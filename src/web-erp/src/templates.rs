use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Log in | College ERP</title></head>
<body>
  <h1>College ERP</h1>
  {% if let Some(message) = error %}<p class="errornote">{{ message }}</p>{% endif %}
  <form method="post" action="/accounts/login/">
    <label for="id_username">Username</label>
    <input type="text" name="username" id="id_username" value="{{ username }}" autofocus required>
    <label for="id_password">Password</label>
    <input type="password" name="password" id="id_password" required>
    {% if let Some(target) = next %}<input type="hidden" name="next" value="{{ target }}">{% endif %}
    <button type="submit">Log in</button>
  </form>
</body>
</html>"#
)]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub username: String,
    pub next: Option<String>,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Home | College ERP</title></head>
<body>
  <h1>Welcome, {{ username }}</h1>
  {% if is_staff %}<p><a href="/admin/">Site administration</a></p>{% endif %}
  <p><a href="/accounts/logout/">Log out</a></p>
</body>
</html>"#
)]
pub struct HomeTemplate {
    pub username: String,
    pub is_staff: bool,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Site administration | College ERP</title></head>
<body>
  <h1>Site administration</h1>
  <p>Signed in as {{ username }}. <a href="/accounts/logout/">Log out</a></p>
</body>
</html>"#
)]
pub struct AdminIndexTemplate {
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Template rendering failed: {0}")]
pub struct RenderError(#[from] askama::Error);

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to render page");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Render a template into an HTML response body.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, RenderError> {
    Ok(Html(template.render()?))
}

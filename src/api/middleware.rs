use axum::{
    extract::{Extension, Request},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Service tokens for the three caller roles. Loaded once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    pub admin_token: String,
    pub staff_token: String,
    pub user_token: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            admin_token: std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "admin-token".to_string()),
            staff_token: std::env::var("STAFF_TOKEN").unwrap_or_else(|_| "staff-token".to_string()),
            user_token: std::env::var("USER_TOKEN").unwrap_or_else(|_| "user-token".to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Staff,
    User,
}

fn bearer_role(cfg: &AuthConfig, request: &Request) -> Option<Role> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))?;

    if token == cfg.admin_token {
        Some(Role::Admin)
    } else if token == cfg.staff_token {
        Some(Role::Staff)
    } else if token == cfg.user_token {
        Some(Role::User)
    } else {
        None
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"flag": false, "message": "Unauthorized", "data": null})),
    )
        .into_response()
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"flag": false, "message": "Forbidden", "data": null})),
    )
        .into_response()
}

/// Bearer-token policy for the API routes: reads are AdminOrStaffOrUser,
/// mutations are AdminOrStaff.
pub async fn authorize(
    Extension(cfg): Extension<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(role) = bearer_role(&cfg, &request) else {
        return unauthorized();
    };

    let read_only = matches!(*request.method(), Method::GET | Method::HEAD);
    if !read_only && role == Role::User {
        return forbidden();
    }

    request.extensions_mut().insert(role);
    next.run(request).await
}

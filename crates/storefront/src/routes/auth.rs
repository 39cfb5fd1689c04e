//! Authentication route handlers.
//!
//! Handles login, registration, and logout. Credential checking and token
//! issuance belong to the inventory API; these handlers just relay the
//! forms and keep the session in line with the outcome.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shoeworld_core::{Email, Username};

use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::shoeworld::{NewUser, ShoeWorldError};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> LoginTemplate {
    LoginTemplate {
        user,
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// Authenticates against the inventory API; the returned bearer token is
/// stored in the session alongside the user's identity.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username.is_empty() || form.password.is_empty() {
        return Redirect::to("/auth/login?error=credentials").into_response();
    }

    match state
        .shoeworld()
        .login(&form.username, &form.password)
        .await
    {
        Ok(login) => {
            let user = CurrentUser {
                id: login.user.id,
                username: login.user.username,
                role: login.user.role,
                api_token: login.token,
            };

            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            crate::error::set_sentry_user(&user.id, Some(user.username.as_str()));

            Redirect::to("/shop").into_response()
        }
        Err(e @ (ShoeWorldError::Http(_) | ShoeWorldError::Parse(_))) => {
            tracing::error!("Inventory API unreachable during login: {e}");
            Redirect::to("/auth/login?error=backend").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> RegisterTemplate {
    RegisterTemplate {
        user,
        error: query.error,
    }
}

/// Handle registration form submission.
///
/// Validates the username and email locally before relaying to the
/// inventory API; validation failures re-render the form with the
/// specific message.
#[instrument(skip(state, form))]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.username.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty()
    {
        return register_error("Please fill in all fields");
    }

    let username = match Username::parse(form.username.trim()) {
        Ok(username) => username,
        Err(e) => return register_error(&e.to_string()),
    };

    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => return register_error(&e.to_string()),
    };

    // Unknown role values fall back to customer
    let role = form.role.parse().unwrap_or_default();

    let new_user = NewUser {
        username,
        email,
        password: form.password,
        role,
    };

    match state.shoeworld().register(&new_user).await {
        Ok(()) => Redirect::to("/auth/login?success=registered").into_response(),
        Err(e @ (ShoeWorldError::Http(_) | ShoeWorldError::Parse(_))) => {
            tracing::error!("Inventory API unreachable during registration: {e}");
            register_error("Connection error. Please try again.")
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            register_error(&e.user_message())
        }
    }
}

/// Re-render the registration form with an error message.
fn register_error(message: &str) -> Response {
    RegisterTemplate {
        user: None,
        error: Some(message.to_string()),
    }
    .into_response()
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Drops the whole session: identity, bearer token, and cart. The API
/// token is stateless, so there is nothing to revoke server-side.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session user: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    crate::error::clear_sentry_user();

    Redirect::to("/")
}

//! Admin route handlers.
//!
//! A single product-creation form, restricted to admin users. The
//! category selector swaps its category-specific attribute input in via
//! a fragment request, and submissions post back as fragments so the
//! form can re-render with a message without a page load.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shoeworld_core::ShoeCategory;

use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::shoeworld::{NewShoe, ShoeWorldError};
use crate::state::AppState;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Product creation form data.
///
/// The attribute fields mirror the category selector: only the one
/// matching the selected category is present in the submitted form.
#[derive(Debug, Deserialize)]
pub struct CreateShoeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub style: Option<String>,
    pub sport_type: Option<String>,
    pub material: Option<String>,
}

/// Query parameters for the category fields fragment.
#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    #[serde(default)]
    pub category: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub user: Option<CurrentUser>,
    pub categories: &'static [ShoeCategory],
    pub category: ShoeCategory,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub size: String,
    pub stock: String,
    pub color: String,
    pub image: String,
    pub attribute: String,
    pub message: Option<String>,
    pub message_is_error: bool,
}

/// Admin form fragment template (the POST response).
#[derive(Template, WebTemplate)]
#[template(path = "partials/admin_form.html")]
pub struct AdminFormTemplate {
    pub categories: &'static [ShoeCategory],
    pub category: ShoeCategory,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub size: String,
    pub stock: String,
    pub color: String,
    pub image: String,
    pub attribute: String,
    pub message: Option<String>,
    pub message_is_error: bool,
}

/// Category attribute input fragment template, swapped when the
/// category selector changes.
#[derive(Template, WebTemplate)]
#[template(path = "partials/admin_fields.html")]
pub struct AdminFieldsTemplate {
    pub category: ShoeCategory,
    pub attribute: String,
}

/// An empty form for the given category.
fn blank_form(category: ShoeCategory) -> AdminFormTemplate {
    AdminFormTemplate {
        categories: &ShoeCategory::ALL,
        category,
        name: String::new(),
        brand: String::new(),
        price: String::new(),
        size: String::new(),
        stock: String::new(),
        color: String::new(),
        image: String::new(),
        attribute: String::new(),
        message: None,
        message_is_error: false,
    }
}

/// The form re-rendered with the submitted values intact.
fn echoed_form(form: &CreateShoeForm, category: ShoeCategory) -> AdminFormTemplate {
    let attribute = match category {
        ShoeCategory::Casual => form.style.clone(),
        ShoeCategory::Athletic => form.sport_type.clone(),
        ShoeCategory::Formal => form.material.clone(),
    };

    AdminFormTemplate {
        categories: &ShoeCategory::ALL,
        category,
        name: form.name.clone(),
        brand: form.brand.clone(),
        price: form.price.clone(),
        size: form.size.clone(),
        stock: form.stock.clone(),
        color: form.color.clone(),
        image: form.image.clone(),
        attribute: attribute.unwrap_or_default(),
        message: None,
        message_is_error: false,
    }
}

/// Submission outcome: the echoed form plus an error message.
fn form_error(form: &CreateShoeForm, category: ShoeCategory, message: &str) -> Response {
    let mut template = echoed_form(form, category);
    template.message = Some(message.to_string());
    template.message_is_error = true;
    template.into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product creation form.
#[instrument(skip(user))]
pub async fn index(RequireAdmin(user): RequireAdmin) -> AdminTemplate {
    let form = blank_form(ShoeCategory::default());

    AdminTemplate {
        user: Some(user),
        categories: form.categories,
        category: form.category,
        name: form.name,
        brand: form.brand,
        price: form.price,
        size: form.size,
        stock: form.stock,
        color: form.color,
        image: form.image,
        attribute: form.attribute,
        message: form.message,
        message_is_error: form.message_is_error,
    }
}

/// Category attribute input fragment (HTMX).
#[instrument(skip(_user))]
pub async fn fields(
    RequireAdmin(_user): RequireAdmin,
    Query(query): Query<FieldsQuery>,
) -> AdminFieldsTemplate {
    AdminFieldsTemplate {
        category: query.category.parse().unwrap_or_default(),
        attribute: String::new(),
    }
}

/// Handle product creation form submission.
///
/// Validates the required fields, fills the category-specific attribute
/// default, and relays to the inventory API with the session's bearer
/// token. A 401 from the API means the token went stale: the session is
/// dropped and the client is sent back to login.
#[instrument(skip(state, user, session, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    session: Session,
    Form(form): Form<CreateShoeForm>,
) -> Response {
    // Unknown category values fall back to casual
    let category: ShoeCategory = form.category.parse().unwrap_or_default();

    if form.name.trim().is_empty() || form.brand.trim().is_empty() || form.price.trim().is_empty()
    {
        return form_error(
            &form,
            category,
            "Please fill in required fields (Name, Brand, Price)",
        );
    }

    let Ok(price) = form.price.trim().parse::<Decimal>() else {
        return form_error(&form, category, "Please enter a valid price");
    };

    let stock = form.stock.trim().parse::<u32>().unwrap_or(0);

    // The category-specific attribute, defaulted when left blank
    let supplied = match category {
        ShoeCategory::Casual => form.style.as_deref(),
        ShoeCategory::Athletic => form.sport_type.as_deref(),
        ShoeCategory::Formal => form.material.as_deref(),
    };
    let attribute = supplied
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| category.attribute_default().to_string(), ToString::to_string);

    let mut new_shoe = NewShoe {
        name: form.name.trim().to_string(),
        brand: form.brand.trim().to_string(),
        price,
        size: non_blank(&form.size).unwrap_or_else(|| "10".to_string()),
        stock,
        color: non_blank(&form.color).unwrap_or_else(|| "Black".to_string()),
        category,
        image: non_blank(&form.image),
        style: None,
        sport_type: None,
        material: None,
    };

    match category {
        ShoeCategory::Casual => new_shoe.style = Some(attribute),
        ShoeCategory::Athletic => new_shoe.sport_type = Some(attribute),
        ShoeCategory::Formal => new_shoe.material = Some(attribute),
    }

    match state.shoeworld().create_shoe(&user.api_token, &new_shoe).await {
        Ok(()) => {
            let mut template = blank_form(ShoeCategory::default());
            template.message = Some("Shoe added successfully!".to_string());
            template.into_response()
        }
        Err(ShoeWorldError::Unauthorized(_)) => {
            // Stale token: the session's copy is no longer honored by the API
            if let Err(e) = session.flush().await {
                tracing::error!("Failed to flush session: {e}");
            }

            (
                StatusCode::UNAUTHORIZED,
                [("hx-redirect", "/auth/login")],
                "Session expired",
            )
                .into_response()
        }
        Err(e @ (ShoeWorldError::Http(_) | ShoeWorldError::Parse(_))) => {
            tracing::error!("Inventory API unreachable during shoe creation: {e}");
            form_error(&form, category, "Connection error. Please try again.")
        }
        Err(e) => {
            tracing::warn!("Shoe creation rejected: {e}");
            form_error(&form, category, &e.user_message())
        }
    }
}

/// The trimmed value, or `None` when blank.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

//! Cart route handlers.
//!
//! The cart lives in the session. Every mutation returns the refreshed
//! nav badge (the buttons' swap target, present on every page) and fires
//! a `cart-updated` HTMX trigger; the product grid and the cart body
//! listen for it and re-fetch themselves. One mutation therefore
//! re-renders every view that shows cart state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shoeworld_core::ShoeId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Cart, CurrentUser, session_keys};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub shoe_id: ShoeId,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub color: String,
    pub price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    shoe_id: line.shoe_id,
                    name: line.name.clone(),
                    brand: line.brand.clone(),
                    size: line.size.clone(),
                    color: line.color.clone(),
                    price: line.price,
                    quantity: line.quantity,
                    line_total: line.line_total(),
                })
                .collect(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart out of the session, defaulting to empty.
pub(crate) async fn cart_from_session(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart back into the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save cart to session: {e}")))
}

/// Cart mutation form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub shoe_id: ShoeId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub user: Option<CurrentUser>,
    pub cart: CartView,
}

/// Cart body fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirm.html")]
pub struct CheckoutTemplate {
    pub user: Option<CurrentUser>,
    pub total: Decimal,
    pub line_count: usize,
}

/// Badge-fragment response for cart mutations: the refreshed count plus
/// the `cart-updated` trigger for the grid and cart-body listeners.
fn mutation_response(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_quantity(),
        },
    )
        .into_response()
}

/// Display the cart page.
#[instrument(skip(session, user))]
pub async fn show(RequireAuth(user): RequireAuth, session: Session) -> CartShowTemplate {
    let cart = cart_from_session(&session).await;

    CartShowTemplate {
        user: Some(user),
        cart: CartView::from(&cart),
    }
}

/// Add a shoe to the cart (HTMX).
///
/// Looks the shoe up in the cached catalog and refuses out-of-stock
/// shoes, the server-side counterpart of the disabled button.
#[instrument(skip(state, _user, session))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let shoe = state.shoeworld().get_shoe(form.shoe_id).await?;

    if !shoe.in_stock() {
        return Err(AppError::BadRequest("This shoe is out of stock".to_string()));
    }

    let mut cart = cart_from_session(&session).await;
    cart.add(&shoe);
    save_cart(&session, &cart).await?;

    let shoe_id = form.shoe_id.to_string();
    crate::error::add_breadcrumb("cart", "Added shoe to cart", Some(&[("shoe_id", &shoe_id)]));

    Ok(mutation_response(&cart))
}

/// Increment a cart line's quantity (HTMX).
#[instrument(skip(_user, session))]
pub async fn increase(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let mut cart = cart_from_session(&session).await;
    cart.increase(form.shoe_id);
    save_cart(&session, &cart).await?;

    Ok(mutation_response(&cart))
}

/// Decrement a cart line's quantity (HTMX).
///
/// A decrement at quantity 1 removes the line.
#[instrument(skip(_user, session))]
pub async fn decrease(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let mut cart = cart_from_session(&session).await;
    cart.decrease(form.shoe_id);
    save_cart(&session, &cart).await?;

    Ok(mutation_response(&cart))
}

/// Remove a cart line entirely (HTMX).
#[instrument(skip(_user, session))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let mut cart = cart_from_session(&session).await;
    cart.remove(form.shoe_id);
    save_cart(&session, &cart).await?;

    Ok(mutation_response(&cart))
}

/// Cart count badge fragment (HTMX).
///
/// Deliberately does not require authentication: the badge is in the nav
/// on every page, and anonymous visitors simply see zero.
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    let cart = cart_from_session(&session).await;

    CartCountTemplate {
        count: cart.total_quantity(),
    }
}

/// Cart body fragment (HTMX), refreshed on `cart-updated`.
#[instrument(skip(_user, session))]
pub async fn items(RequireAuth(_user): RequireAuth, session: Session) -> CartItemsTemplate {
    let cart = cart_from_session(&session).await;

    CartItemsTemplate {
        cart: CartView::from(&cart),
    }
}

/// Checkout stub.
///
/// No order is placed and the cart is left untouched; an empty cart just
/// bounces back to the cart page.
#[instrument(skip(user, session))]
pub async fn checkout(RequireAuth(user): RequireAuth, session: Session) -> Response {
    let cart = cart_from_session(&session).await;

    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        user: Some(user),
        total: cart.subtotal(),
        line_count: cart.lines().len(),
    }
    .into_response()
}

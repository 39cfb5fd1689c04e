//! Shop route handlers.
//!
//! The shop page is a category filter bar over the product grid. The grid
//! is an HTMX fragment that re-renders on filter clicks and on every cart
//! mutation, so the per-card quantity controls always reflect the session
//! cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shoeworld_core::{ShoeCategory, ShoeId};

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Cart, CurrentUser};
use crate::routes::cart::cart_from_session;
use crate::shoeworld::Shoe;
use crate::state::AppState;

/// Fallback product photo for shoes without an image URL.
const FALLBACK_IMAGE: &str = "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400";

/// Shoe display data for grid cards.
#[derive(Clone)]
pub struct ShoeView {
    pub id: ShoeId,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub color: String,
    pub category: ShoeCategory,
    pub price: Decimal,
    pub stock: u32,
    pub image: String,
    /// Quantity of this shoe in the viewer's cart, if any.
    pub in_cart: Option<u32>,
}

impl ShoeView {
    pub(crate) fn from_shoe(shoe: &Shoe, cart: &Cart) -> Self {
        Self {
            id: shoe.id,
            name: shoe.name.clone(),
            brand: shoe.brand.clone(),
            size: shoe.size.clone(),
            color: shoe.color.clone(),
            category: shoe.category,
            price: shoe.price,
            stock: shoe.stock,
            image: shoe
                .image
                .clone()
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
            in_cart: cart.line_quantity(shoe.id),
        }
    }
}

/// Category filter query parameter.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    /// The selected category; `all`, absent, and unrecognized values all
    /// mean unfiltered.
    fn selected(&self) -> Option<ShoeCategory> {
        self.category.as_deref().and_then(|value| value.parse().ok())
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub user: Option<CurrentUser>,
    pub category: String,
    pub categories: &'static [ShoeCategory],
    pub shoes: Vec<ShoeView>,
    pub load_failed: bool,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/shoe_grid.html")]
pub struct ShoeGridTemplate {
    pub category: String,
    pub categories: &'static [ShoeCategory],
    pub shoes: Vec<ShoeView>,
    pub load_failed: bool,
}

/// Load the (possibly filtered) catalog as grid cards.
///
/// A backend failure is logged and surfaced as the grid's error state,
/// never as raw error text.
async fn load_grid(
    state: &AppState,
    cart: &Cart,
    selected: Option<ShoeCategory>,
) -> (Vec<ShoeView>, bool) {
    match state.shoeworld().list_shoes().await {
        Ok(shoes) => {
            let shoes = shoes
                .iter()
                .filter(|shoe| selected.is_none_or(|category| shoe.category == category))
                .map(|shoe| ShoeView::from_shoe(shoe, cart))
                .collect();
            (shoes, false)
        }
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            (Vec::new(), true)
        }
    }
}

/// Display the shop page.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CategoryQuery>,
) -> ShopTemplate {
    let selected = query.selected();
    let cart = cart_from_session(&session).await;
    let (shoes, load_failed) = load_grid(&state, &cart, selected).await;

    ShopTemplate {
        user,
        category: selected.map_or("all", |c| c.as_str()).to_string(),
        categories: &ShoeCategory::ALL,
        shoes,
        load_failed,
    }
}

/// Product grid fragment (HTMX).
///
/// Also the refresh target for `cart-updated` events, so the fragment
/// carries its own category in its refresh URL.
#[instrument(skip(state, session))]
pub async fn grid(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CategoryQuery>,
) -> ShoeGridTemplate {
    let selected = query.selected();
    let cart = cart_from_session(&session).await;
    let (shoes, load_failed) = load_grid(&state, &cart, selected).await;

    ShoeGridTemplate {
        category: selected.map_or("all", |c| c.as_str()).to_string(),
        categories: &ShoeCategory::ALL,
        shoes,
        load_failed,
    }
}

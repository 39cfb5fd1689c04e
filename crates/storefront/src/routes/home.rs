//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::routes::cart::cart_from_session;
use crate::routes::shop::ShoeView;
use crate::state::AppState;

/// Number of shoes shown in the featured strip.
const FEATURED_COUNT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub featured: Vec<ShoeView>,
}

/// Display the home page: hero banner plus a short featured strip.
///
/// A catalog failure here just drops the strip; the hero never breaks.
#[instrument(skip(state, session, user))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> HomeTemplate {
    let cart = cart_from_session(&session).await;

    let featured = state.shoeworld().list_shoes().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch featured shoes: {e}");
            Vec::new()
        },
        |shoes| {
            shoes
                .iter()
                .take(FEATURED_COUNT)
                .map(|shoe| ShoeView::from_shoe(shoe, &cart))
                .collect()
        },
    );

    HomeTemplate { user, featured }
}

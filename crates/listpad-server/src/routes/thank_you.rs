//! Confirmation page: `GET /thank-you`.

use std::sync::Arc;

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use listpad_core::route::Route;

use crate::render;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::ThankYou.path(), get(thank_you))
}

async fn thank_you() -> Html<String> {
    Html(render::thank_you_page())
}

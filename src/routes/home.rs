//! Routes registered directly on the server, outside any plugin.

use axum::response::Html;

use crate::routing::Route;

const HOME_PAGE: &str = "<h1>plugin-server</h1><p>Plugin routes live under their registration prefix.</p>";

pub fn routes() -> Vec<Route> {
    vec![Route::get("/", || async { Html(HOME_PAGE) })]
}

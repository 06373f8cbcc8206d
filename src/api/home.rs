//! Catalog home page

use axum::{extract::State, response::{Html, Response}};

use super::found;
use crate::{error::AppResult, models::CATALOG_PREFIX, views::page, AppState};

pub async fn root() -> Response {
    found(CATALOG_PREFIX)
}

/// Home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    let mut context = page("Local Library Home");
    context.insert("counts", &counts);
    state.views.render("index.html", &context)
}

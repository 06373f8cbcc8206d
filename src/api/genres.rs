//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;

use super::{found, list_url, path_id};
use crate::{
    error::AppResult,
    models::{Book, GenreForm},
    services::{genres::GenreDetail, DeleteOutcome},
    validation::{sanitize_and_validate, FieldError},
    views::{page, BookView, GenreView},
    AppState,
};

fn render_form(
    state: &AppState,
    title: &str,
    form: &GenreForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = page(title);
    context.insert("form", form);
    context.insert("errors", errors);
    state.views.render("genre_form.html", &context)
}

fn book_views(books: &[Book]) -> Vec<BookView> {
    books.iter().map(|b| BookView::new(b, None)).collect()
}

fn render_delete(state: &AppState, detail: &GenreDetail) -> AppResult<Html<String>> {
    let mut context = page("Delete Genre");
    context.insert("genre", &GenreView::from(&detail.genre));
    context.insert("books", &book_views(&detail.books));
    state.views.render("genre_delete.html", &context)
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    let genres: Vec<GenreView> = genres.iter().map(GenreView::from).collect();

    let mut context = page("Genre List");
    context.insert("genres", &genres);
    state.views.render("genre_list.html", &context)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Genre")?;
    let detail = state.services.genres.detail(id).await?;

    let mut context = page("Genre Detail");
    context.insert("genre", &GenreView::from(&detail.genre));
    context.insert("books", &book_views(&detail.books));
    state.views.render("genre_detail.html", &context)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Genre", &GenreForm::default(), &[])
}

/// Creates the genre, or redirects to the one that already has this name
pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        return Ok(render_form(&state, "Create Genre", &form, &errors)?.into_response());
    }

    let genre = state.services.genres.create(form.to_data()).await?;
    Ok(found(&genre.url()))
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Genre") else {
        return Ok(found(&list_url("genre")));
    };
    match state.services.genres.find_detail(id).await? {
        Some(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        None => Ok(found(&list_url("genre"))),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Genre") else {
        return Ok(found(&list_url("genre")));
    };
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Blocked(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(found(&list_url("genre"))),
    }
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Genre")?;
    let genre = state.services.genres.get(id).await?;
    render_form(&state, "Update Genre", &GenreForm::from(&genre), &[])
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let id = path_id(&id, "Genre")?;
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        state.services.genres.get(id).await?;
        return Ok(render_form(&state, "Update Genre", &form, &errors)?.into_response());
    }

    let genre = state.services.genres.update(id, form.to_data()).await?;
    Ok(found(&genre.url()))
}

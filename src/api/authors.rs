//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;

use super::{found, list_url, path_id};
use crate::{
    error::AppResult,
    models::{AuthorForm, Book},
    services::{authors::AuthorDetail, DeleteOutcome},
    validation::{sanitize_and_validate, FieldError},
    views::{page, AuthorView, BookView},
    AppState,
};

fn render_form(
    state: &AppState,
    title: &str,
    form: &AuthorForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = page(title);
    context.insert("form", form);
    context.insert("errors", errors);
    state.views.render("author_form.html", &context)
}

fn book_views(books: &[Book]) -> Vec<BookView> {
    books.iter().map(|b| BookView::new(b, None)).collect()
}

fn render_delete(state: &AppState, detail: &AuthorDetail) -> AppResult<Html<String>> {
    let mut context = page("Delete Author");
    context.insert("author", &AuthorView::from(&detail.author));
    context.insert("books", &book_views(&detail.books));
    state.views.render("author_delete.html", &context)
}

/// All authors by family name
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    let authors: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();

    let mut context = page("Author List");
    context.insert("authors", &authors);
    state.views.render("author_list.html", &context)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Author")?;
    let detail = state.services.authors.detail(id).await?;

    let mut context = page("Author Detail");
    context.insert("author", &AuthorView::from(&detail.author));
    context.insert("books", &book_views(&detail.books));
    state.views.render("author_detail.html", &context)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Author", &AuthorForm::default(), &[])
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        return Ok(render_form(&state, "Create Author", &form, &errors)?.into_response());
    }

    let author = state.services.authors.create(form.to_data()).await?;
    Ok(found(&author.url()))
}

/// Confirmation page listing the books that block the delete
pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Author") else {
        return Ok(found(&list_url("author")));
    };
    match state.services.authors.find_detail(id).await? {
        Some(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        None => Ok(found(&list_url("author"))),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Author") else {
        return Ok(found(&list_url("author")));
    };
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Blocked(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(found(&list_url("author"))),
    }
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Author")?;
    let author = state.services.authors.get(id).await?;
    render_form(&state, "Update Author", &AuthorForm::from(&author), &[])
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let id = path_id(&id, "Author")?;
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        state.services.authors.get(id).await?;
        return Ok(render_form(&state, "Update Author", &form, &errors)?.into_response());
    }

    let author = state.services.authors.update(id, form.to_data()).await?;
    Ok(found(&author.url()))
}

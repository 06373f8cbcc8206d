//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;

use super::{found, list_url, path_id};
use crate::{
    error::AppResult,
    models::{Book, BookForm, BookInstance},
    services::{
        books::{BookDetail, BookFormChoices},
        DeleteOutcome,
    },
    validation::{sanitize_and_validate, FieldError},
    views::{page, BookInstanceView, BookView, GenreView, SelectOption},
    AppState,
};

/// Renders the book form with the submitted author and genres selected
fn render_form(
    state: &AppState,
    title: &str,
    form: &BookForm,
    choices: &BookFormChoices,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let authors: Vec<SelectOption> = choices
        .authors
        .iter()
        .map(|a| SelectOption::new(a.id, a.name(), form.is_author(&a.id)))
        .collect();
    let genres: Vec<SelectOption> = choices
        .genres
        .iter()
        .map(|g| SelectOption::new(g.id, g.name.clone(), form.has_genre(&g.id)))
        .collect();

    let mut context = page(title);
    context.insert("form", form);
    context.insert("authors", &authors);
    context.insert("genres", &genres);
    context.insert("errors", errors);
    state.views.render("book_form.html", &context)
}

fn instance_views(instances: &[BookInstance], book: &Book) -> Vec<BookInstanceView> {
    instances
        .iter()
        .map(|i| BookInstanceView::new(i, Some(book)))
        .collect()
}

fn render_delete(state: &AppState, detail: &BookDetail) -> AppResult<Html<String>> {
    let mut context = page("Delete Book");
    context.insert("book", &BookView::new(&detail.book, detail.author.as_ref()));
    context.insert("instances", &instance_views(&detail.instances, &detail.book));
    state.views.render("book_delete.html", &context)
}

/// All books by title, each with its author
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let listings = state.services.books.list().await?;
    let books: Vec<BookView> = listings
        .iter()
        .map(|l| BookView::new(&l.book, l.author.as_ref()))
        .collect();

    let mut context = page("Book List");
    context.insert("books", &books);
    state.views.render("book_list.html", &context)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Book")?;
    let detail = state.services.books.detail(id).await?;
    let genres: Vec<GenreView> = detail.genres.iter().map(GenreView::from).collect();

    let mut context = page("Book Detail");
    context.insert("book", &BookView::new(&detail.book, detail.author.as_ref()));
    context.insert("genres", &genres);
    context.insert("instances", &instance_views(&detail.instances, &detail.book));
    state.views.render("book_detail.html", &context)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let choices = state.services.books.form_choices().await?;
    render_form(&state, "Create Book", &BookForm::default(), &choices, &[])
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        let choices = state.services.books.form_choices().await?;
        return Ok(render_form(&state, "Create Book", &form, &choices, &errors)?.into_response());
    }

    let book = state.services.books.create(form.to_data()).await?;
    Ok(found(&book.url()))
}

/// Confirmation page listing the copies that block the delete
pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Book") else {
        return Ok(found(&list_url("book")));
    };
    match state.services.books.find_detail(id).await? {
        Some(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        None => Ok(found(&list_url("book"))),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Book") else {
        return Ok(found(&list_url("book")));
    };
    match state.services.books.delete(id).await? {
        DeleteOutcome::Blocked(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Ok(found(&list_url("book"))),
    }
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Book")?;
    let (book, choices) = state.services.books.edit(id).await?;
    render_form(&state, "Update Book", &BookForm::from(&book), &choices, &[])
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = path_id(&id, "Book")?;
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        let (_, choices) = state.services.books.edit(id).await?;
        return Ok(render_form(&state, "Update Book", &form, &choices, &errors)?.into_response());
    }

    let book = state.services.books.update(id, form.to_data()).await?;
    Ok(found(&book.url()))
}

//! Book copy pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;

use super::{found, list_url, path_id};
use crate::{
    error::AppResult,
    models::{Author, Book, BookInstanceForm, BookInstanceStatus},
    services::{book_instances::BookInstanceListing, DeleteOutcome},
    validation::{sanitize_and_validate, FieldError},
    views::{page, BookInstanceView, SelectOption},
    AppState,
};

fn render_form(
    state: &AppState,
    title: &str,
    form: &BookInstanceForm,
    books: &[Book],
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let books: Vec<SelectOption> = books
        .iter()
        .map(|b| SelectOption::new(b.id, b.title.clone(), form.is_book(&b.id)))
        .collect();
    let statuses: Vec<SelectOption> = BookInstanceStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s, s.as_str(), form.status == s.as_str()))
        .collect();

    let mut context = page(title);
    context.insert("form", form);
    context.insert("books", &books);
    context.insert("statuses", &statuses);
    context.insert("errors", errors);
    state.views.render("bookinstance_form.html", &context)
}

fn render_delete(state: &AppState, listing: &BookInstanceListing) -> AppResult<Html<String>> {
    let mut context = page("Delete BookInstance");
    context.insert(
        "instance",
        &BookInstanceView::new(&listing.instance, listing.book.as_ref()),
    );
    state.views.render("bookinstance_delete.html", &context)
}

/// All copies in insertion order, each with its book
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let listings = state.services.book_instances.list().await?;
    let instances: Vec<BookInstanceView> = listings
        .iter()
        .map(|l| BookInstanceView::new(&l.instance, l.book.as_ref()))
        .collect();

    let mut context = page("Book Instance List");
    context.insert("instances", &instances);
    state.views.render("bookinstance_list.html", &context)
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Book copy")?;
    let detail = state.services.book_instances.detail(id).await?;
    let author = detail.author.as_ref();

    let mut context = page("Book Copy");
    context.insert(
        "instance",
        &BookInstanceView::new(&detail.instance, detail.book.as_ref()),
    );
    context.insert("author_name", &author.map(Author::name).unwrap_or_default());
    context.insert("author_url", &author.map(Author::url).unwrap_or_default());
    state.views.render("bookinstance_detail.html", &context)
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.book_choices().await?;
    render_form(
        &state,
        "Create BookInstance",
        &BookInstanceForm::default(),
        &books,
        &[],
    )
}

pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        let books = state.services.book_instances.book_choices().await?;
        return Ok(
            render_form(&state, "Create BookInstance", &form, &books, &errors)?.into_response(),
        );
    }

    let instance = state.services.book_instances.create(form.to_data()).await?;
    Ok(found(&instance.url()))
}

pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Book copy") else {
        return Ok(found(&list_url("bookinstance")));
    };
    match state.services.book_instances.find_listing(id).await? {
        Some(listing) => Ok(render_delete(&state, &listing)?.into_response()),
        None => Ok(found(&list_url("bookinstance"))),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = path_id(&id, "Book copy") else {
        return Ok(found(&list_url("bookinstance")));
    };
    match state.services.book_instances.delete(id).await? {
        DeleteOutcome::Blocked(listing) => Ok(render_delete(&state, &listing)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(found(&list_url("bookinstance")))
        }
    }
}

pub async fn update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(&id, "Book copy")?;
    let (instance, books) = state.services.book_instances.edit(id).await?;
    render_form(
        &state,
        "Update BookInstance",
        &BookInstanceForm::from(&instance),
        &books,
        &[],
    )
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = path_id(&id, "Book copy")?;
    let (form, errors) = sanitize_and_validate(form);
    if !errors.is_empty() {
        let (_, books) = state.services.book_instances.edit(id).await?;
        return Ok(
            render_form(&state, "Update BookInstance", &form, &books, &errors)?.into_response(),
        );
    }

    let instance = state.services.book_instances.update(id, form.to_data()).await?;
    Ok(found(&instance.url()))
}

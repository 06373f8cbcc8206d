//! Book instance domain methods on Repository

use uuid::Uuid;

use super::{Filter, Repository, BOOK_INSTANCES};
use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceData, BookInstanceStatus},
};

impl Repository {
    /// List all copies in creation order
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        self.find_docs(BOOK_INSTANCES, Filter::All, None).await
    }

    pub async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.get_doc(BOOK_INSTANCES, id).await
    }

    /// Copies of a book
    pub async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.find_docs(BOOK_INSTANCES, Filter::Eq("book", book_id.to_string()), None)
            .await
    }

    pub async fn book_instances_create(&self, data: BookInstanceData) -> AppResult<BookInstance> {
        let id = self.insert_doc(BOOK_INSTANCES, &data).await?;
        Ok(data.into_instance(id))
    }

    pub async fn book_instances_update(
        &self,
        id: Uuid,
        data: BookInstanceData,
    ) -> AppResult<BookInstance> {
        if !self.replace_doc(BOOK_INSTANCES, id, &data).await? {
            return Err(AppError::not_found("Book copy"));
        }
        Ok(data.into_instance(id))
    }

    pub async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove_doc(BOOK_INSTANCES, id).await
    }

    pub async fn book_instances_count(&self) -> AppResult<i64> {
        self.count_docs(BOOK_INSTANCES, Filter::All).await
    }

    pub async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        self.count_docs(BOOK_INSTANCES, Filter::Eq("status", status.to_string()))
            .await
    }
}

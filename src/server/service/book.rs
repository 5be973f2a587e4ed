use sea_orm::DatabaseConnection;

use crate::server::{
    collection::{Collection, CollectionQuery},
    data::{book::BookRepository, category::CategoryRepository, TopToggle},
    error::AppError,
    model::book::{Book, BookProperties, CreateBookParams, UpdateBookParams, MAX_TOP_BOOKS},
};

pub struct BookService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(Book)` - The created book
    /// - `Err(AppError::NotFound)` - The category doesn't exist
    pub async fn create(&self, params: CreateBookParams) -> Result<Book, AppError> {
        self.ensure_category(params.category_id).await?;

        let book = BookRepository::new(self.db).create(params).await?;

        tracing::info!(book_id = book.id, "Book created");

        Ok(book)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Book>, AppError> {
        Ok(BookRepository::new(self.db).get_by_id(id).await?)
    }

    pub async fn get_collection(&self, query: &CollectionQuery) -> Result<Collection<Book>, AppError> {
        let parsed = query.parse::<BookProperties>()?;

        Ok(BookRepository::new(self.db).get_collection(parsed).await?)
    }

    pub async fn get_value_labels(&self) -> Result<Vec<Book>, AppError> {
        Ok(BookRepository::new(self.db).get_all_by_name().await?)
    }

    pub async fn get_top(&self) -> Result<Vec<Book>, AppError> {
        Ok(BookRepository::new(self.db).get_top().await?)
    }

    /// Flips the book's top-of-the-year flag.
    ///
    /// # Returns
    /// - `Ok(Some(Book))` - The updated book
    /// - `Ok(None)` - The book doesn't exist
    /// - `Err(AppError::BadRequest)` - Marking would exceed `MAX_TOP_BOOKS`
    pub async fn toggle_top(&self, id: i32) -> Result<Option<Book>, AppError> {
        match BookRepository::new(self.db).toggle_top(id, MAX_TOP_BOOKS).await? {
            TopToggle::Toggled(book) => Ok(Some(book)),
            TopToggle::Missing => Ok(None),
            TopToggle::CapReached => Err(AppError::BadRequest(format!(
                "At most {} books can be marked as top of the year",
                MAX_TOP_BOOKS
            ))),
        }
    }

    /// # Returns
    /// - `Ok(Some(Book))` - The updated book
    /// - `Ok(None)` - The book doesn't exist
    /// - `Err(AppError::NotFound)` - A new category was given and doesn't exist
    pub async fn update(&self, params: UpdateBookParams) -> Result<Option<Book>, AppError> {
        if let Some(category_id) = params.category_id {
            self.ensure_category(category_id).await?;
        }

        Ok(BookRepository::new(self.db).update(params).await?)
    }

    /// Returns false if the book doesn't exist
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(BookRepository::new(self.db).delete(id).await?)
    }

    async fn ensure_category(&self, category_id: i32) -> Result<(), AppError> {
        if !CategoryRepository::new(self.db).exists(category_id).await? {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn create_requires_existing_category() {
        let test = TestBuilder::new()
            .with_content_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = BookService::new(db)
            .create(CreateBookParams {
                name: "Orphan".to_string(),
                author: "Nobody".to_string(),
                description: None,
                url: None,
                is_premium: true,
                category_id: 99,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn toggle_top_enforces_cap_but_allows_unmarking() {
        let test = TestBuilder::new()
            .with_content_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let category = factory::create_category(db).await.unwrap();
        let mut top = Vec::new();
        for _ in 0..MAX_TOP_BOOKS {
            let book = factory::book::BookFactory::new(db, category.id)
                .top(true)
                .build()
                .await
                .unwrap();
            top.push(book);
        }
        let extra = factory::create_book(db, category.id).await.unwrap();

        let service = BookService::new(db);

        let result = service.toggle_top(extra.id).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let unmarked = service.toggle_top(top[0].id).await.unwrap().unwrap();
        assert!(!unmarked.is_top10_year);

        let marked = service.toggle_top(extra.id).await.unwrap().unwrap();
        assert!(marked.is_top10_year);
    }
}

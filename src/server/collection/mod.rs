//! Generic filtering, sorting and pagination for list endpoints.
//!
//! A resource describes its exposed columns with [`CollectionProperties`]. Controllers accept a
//! [`CollectionQuery`] from the query string, services turn it into a [`ParsedQuery`] (which
//! is where malformed input is rejected), and repositories execute it with [`collect`].

pub mod filter;
pub mod property;
pub mod sorter;

use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::api::{CollectionDto, PaginationDto},
    server::error::collection::CollectionError,
};

pub use property::{CollectionProperties, Field, FieldKind};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Query string accepted by every collection endpoint.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct CollectionQuery {
    /// JSON object, e.g. `{"name":{"$contains":"war"},"is_premium":false}`
    pub filter: Option<String>,
    /// Comma separated fields, `-` prefix for descending, e.g. `-created_at,name`
    pub sort: Option<String>,
    /// Zero-based page number (default 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page, 1 to 100 (default 10)
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl CollectionQuery {
    /// Validates and parses the query against `P`'s fields.
    pub fn parse<P: CollectionProperties>(
        &self,
    ) -> Result<ParsedQuery<<P::Entity as EntityTrait>::Column>, CollectionError> {
        validate_limit(self.limit)?;
        validate_page(self.page, self.limit)?;

        let condition = match self.filter.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => filter::parse_filter::<P>(raw)?,
            _ => Condition::all(),
        };

        Ok(ParsedQuery {
            condition,
            order: sorter::parse_sort::<P>(self.sort.as_deref())?,
            page: self.page,
            limit: self.limit,
        })
    }
}

pub fn validate_limit(limit: u64) -> Result<(), CollectionError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(CollectionError::InvalidLimit {
            limit,
            max: MAX_LIMIT,
        });
    }
    Ok(())
}

/// Rejects pages whose row offset does not fit a signed 64-bit SQL `OFFSET`.
pub fn validate_page(page: u64, limit: u64) -> Result<(), CollectionError> {
    match page.checked_mul(limit) {
        Some(offset) if i64::try_from(offset).is_ok() => Ok(()),
        _ => Err(CollectionError::InvalidPage { page, limit }),
    }
}

/// A validated collection query ready to run against the database.
pub struct ParsedQuery<C> {
    pub condition: Condition,
    pub order: Vec<(C, Order)>,
    pub page: u64,
    pub limit: u64,
}

/// One page of results with the total match count.
#[derive(Debug)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Collection<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Collection<U> {
        Collection {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }

    /// Like `map` for fallible conversions; fails on the first error.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Collection<U>, E> {
        Ok(Collection {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total: self.total,
            page: self.page,
            limit: self.limit,
        })
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> CollectionDto<D> {
        let total_pages = self.total_pages();
        let pagination = PaginationDto {
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages,
            next: self.page.checked_add(1).filter(|next| *next < total_pages),
            prev: (self.page > 0).then(|| self.page - 1),
        };

        CollectionDto {
            data: self.items.into_iter().map(f).collect(),
            pagination,
        }
    }
}

/// Applies a parsed query to `select` and fetches the requested page.
pub async fn collect<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    query: ParsedQuery<E::Column>,
) -> Result<Collection<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let mut select = select.filter(query.condition);
    for (column, order) in query.order {
        select = select.order_by(column, order);
    }

    paginate(db, select, query.page, query.limit).await
}

/// Fetches one zero-based page of an already filtered and ordered query.
pub async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: u64,
    limit: u64,
) -> Result<Collection<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = select.paginate(db, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page).await?;

    Ok(Collection {
        items,
        total,
        page,
        limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(total: u64, page: u64, limit: u64) -> Collection<u8> {
        Collection {
            items: Vec::new(),
            total,
            page,
            limit,
        }
    }

    #[test]
    fn pagination_links() {
        let first = collection(25, 0, 10).into_dto(|i| i);
        assert_eq!(first.pagination.total_pages, 3);
        assert_eq!(first.pagination.next, Some(1));
        assert_eq!(first.pagination.prev, None);

        let last = collection(25, 2, 10).into_dto(|i| i);
        assert_eq!(last.pagination.next, None);
        assert_eq!(last.pagination.prev, Some(1));

        let empty = collection(0, 0, 10).into_dto(|i| i);
        assert_eq!(empty.pagination.total_pages, 0);
        assert_eq!(empty.pagination.next, None);
    }

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_LIMIT).is_ok());
        assert!(validate_limit(MAX_LIMIT + 1).is_err());
    }

    #[test]
    fn page_offset_bounds() {
        assert!(validate_page(0, MAX_LIMIT).is_ok());
        assert!(validate_page(1_000_000, MAX_LIMIT).is_ok());
        assert_eq!(
            validate_page(u64::MAX, 10),
            Err(CollectionError::InvalidPage {
                page: u64::MAX,
                limit: 10
            })
        );
        assert!(validate_page(u64::MAX / 10, 10).is_err());
    }

    #[test]
    fn parse_rejects_overflowing_page() {
        use crate::server::model::category::CategoryProperties;

        let query = CollectionQuery {
            page: u64::MAX,
            limit: 10,
            ..Default::default()
        };

        assert!(matches!(
            query.parse::<CategoryProperties>(),
            Err(CollectionError::InvalidPage { .. })
        ));
    }

    #[test]
    fn last_possible_page_has_no_next() {
        let dto = collection(u64::MAX, u64::MAX, 1).into_dto(|i| i);
        assert_eq!(dto.pagination.next, None);
        assert_eq!(dto.pagination.prev, Some(u64::MAX - 1));
    }
}

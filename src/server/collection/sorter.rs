use sea_orm::Order;

use crate::server::{
    collection::property::{CollectionProperties, ColumnOf},
    error::collection::CollectionError,
};

/// Parses a sort expression such as `-created_at,name`.
///
/// Fields are comma separated; a leading `-` sorts descending. `id` ascending is appended as
/// a final tiebreaker unless `id` was named explicitly, so the result is never empty.
pub fn parse_sort<P: CollectionProperties>(
    raw: Option<&str>,
) -> Result<Vec<(ColumnOf<P>, Order)>, CollectionError> {
    let mut order = Vec::new();
    let mut has_id = false;

    for part in raw.unwrap_or_default().split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (name, direction) = match part.strip_prefix('-') {
            Some(name) => (name, Order::Desc),
            None => (part.strip_prefix('+').unwrap_or(part), Order::Asc),
        };

        if name == "id" {
            has_id = true;
            order.push((P::id_column(), direction));
            continue;
        }

        let field = P::field(name).ok_or_else(|| CollectionError::UnknownField(name.to_string()))?;
        if !field.sortable {
            return Err(CollectionError::NotSortable(name.to_string()));
        }
        order.push((field.column, direction));
    }

    if !has_id {
        order.push((P::id_column(), Order::Asc));
    }

    Ok(order)
}

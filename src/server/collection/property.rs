use sea_orm::EntityTrait;

/// Value type of a collection field, used to coerce filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// RFC 3339 string in filters.
    Timestamp,
}

/// A field exposed to collection filters and sorts.
#[derive(Debug, Clone, Copy)]
pub struct Field<C> {
    pub name: &'static str,
    pub column: C,
    pub kind: FieldKind,
    pub filterable: bool,
    pub sortable: bool,
    /// Lowercased twin matched by `$contains` instead of `column`.
    pub search_column: Option<C>,
}

impl<C> Field<C> {
    pub const fn text(name: &'static str, column: C) -> Self {
        Self::new(name, column, FieldKind::Text)
    }

    pub const fn integer(name: &'static str, column: C) -> Self {
        Self::new(name, column, FieldKind::Integer)
    }

    pub const fn boolean(name: &'static str, column: C) -> Self {
        Self::new(name, column, FieldKind::Boolean)
    }

    pub const fn timestamp(name: &'static str, column: C) -> Self {
        Self::new(name, column, FieldKind::Timestamp)
    }

    const fn new(name: &'static str, column: C, kind: FieldKind) -> Self {
        Self {
            name,
            column,
            kind,
            filterable: true,
            sortable: true,
            search_column: None,
        }
    }

    /// Routes `$contains` to a column holding the lowercased text.
    pub const fn folded(mut self, search_column: C) -> Self
    where
        C: Copy,
    {
        self.search_column = Some(search_column);
        self
    }

    /// Excludes the field from sorting.
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Describes which columns of an entity a collection endpoint exposes.
///
/// `id` is always sortable through the implicit tiebreaker and need not be listed.
pub trait CollectionProperties {
    type Entity: EntityTrait;

    const FIELDS: &'static [Field<<Self::Entity as EntityTrait>::Column>];

    /// Column used as the default sort and final tiebreaker.
    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn field(name: &str) -> Option<&'static Field<<Self::Entity as EntityTrait>::Column>> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

pub(crate) type ColumnOf<P> = <<P as CollectionProperties>::Entity as EntityTrait>::Column;

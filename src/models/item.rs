use diesel::prelude::*;

/// Represents a recyclable material category in the catalog
///
/// This struct maps directly to the `items` table in the database.
/// The catalog is seeded once by a migration and is read-only afterwards;
/// points reference these rows but never own them.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Item {
    /// Unique identifier for the item (assigned by the database)
    id: i32,

    /// Human-readable name of the category
    title: String,

    /// Bare image file name, resolved to an absolute URL at serve time
    image: String,
}

impl Item {
    /// Creates an item with all fields specified
    ///
    /// This method is primarily used for testing and database deserialization.
    pub fn new_with_fields(id: i32, title: String, image: String) -> Self {
        Self { id, title, image }
    }

    /// Gets the item's ID
    pub fn get_id(&self) -> i32 {
        self.id
    }

    /// Gets the item's title
    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    /// Gets the item's image file name
    pub fn get_image(&self) -> String {
        self.image.clone()
    }
}

use diesel::prelude::*;

/// Association row linking a point to one item it accepts
///
/// This struct maps directly to the `point_items` join table.
/// Rows are owned by their point and are inserted in the same
/// transaction that creates it, so a point is never observable
/// without its associations.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::point_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PointItem {
    point_id: i32,
    item_id: i32,
}

impl PointItem {
    /// Creates a new association between a point and an item
    pub fn new(point_id: i32, item_id: i32) -> Self {
        Self { point_id, item_id }
    }

    /// Gets the ID of the owning point
    pub fn get_point_id(&self) -> i32 {
        self.point_id
    }

    /// Gets the ID of the referenced catalog item
    pub fn get_item_id(&self) -> i32 {
        self.item_id
    }
}

use crate::db::DbPool;
use crate::models::Item;
use crate::schema::items;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, instrument};

/// Lists the full item catalog
///
/// The catalog is seeded once by a migration, so two successive calls
/// without intervening writes return identical ordered contents.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing all catalog items ordered by id
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_items(pool: &DbPool) -> Result<Vec<Item>> {
    debug!("Listing item catalog");

    let conn = &mut pool.get()?;

    let result = items::table
        .order(items::id.asc())
        .select(Item::as_select())
        .load::<Item>(conn)?;

    debug!("Catalog contains {} items", result.len());

    Ok(result)
}

/// Returns the subset of the given ids that do not exist in the catalog
///
/// Used to validate point registrations before any row is written: every
/// referenced item id must name a catalog entry.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `item_ids` - The catalog ids referenced by a registration
///
/// ### Returns
///
/// A Result containing the ids with no matching catalog row, in the order
/// they were given
#[instrument(skip(pool))]
pub fn missing_item_ids(pool: &DbPool, item_ids: &[i32]) -> Result<Vec<i32>> {
    let conn = &mut pool.get()?;

    let known: Vec<i32> = items::table
        .filter(items::id.eq_any(item_ids))
        .select(items::id)
        .load::<i32>(conn)?;

    let missing: Vec<i32> = item_ids
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect();

    if !missing.is_empty() {
        debug!("Unknown item ids referenced: {:?}", missing);
    }

    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::tests::setup_test_db;

    #[test]
    fn test_list_items_returns_seeded_catalog_in_order() {
        let pool = setup_test_db();

        let items = list_items(&pool).unwrap();

        assert_eq!(items.len(), 6);
        assert_eq!(items[0].get_title(), "Lamps");
        assert_eq!(items[1].get_title(), "Batteries");

        // The catalog is read-only, so a second listing is identical
        let again = list_items(&pool).unwrap();
        assert_eq!(items, again);
    }

    #[test]
    fn test_missing_item_ids_flags_unknown_ids() {
        let pool = setup_test_db();

        let missing = missing_item_ids(&pool, &[1, 2, 99]).unwrap();
        assert_eq!(missing, vec![99]);
    }

    #[test]
    fn test_missing_item_ids_empty_for_known_ids() {
        let pool = setup_test_db();

        let missing = missing_item_ids(&pool, &[1, 6]).unwrap();
        assert!(missing.is_empty());
    }
}

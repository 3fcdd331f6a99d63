use crate::db::DbPool;
use crate::models::{Item, NewPoint, Point, PointItem};
use crate::schema::{items, point_items, points};
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new collection point together with its item associations
///
/// The point row and one `point_items` row per referenced item are written
/// inside a single transaction: concurrent readers never observe a point
/// without its items, and a failure mid-insert rolls the point back too.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `new_point` - The point fields, without an id
/// * `item_ids` - IDs of the catalog items the point accepts
///
/// ### Returns
///
/// A Result containing the created Point with its assigned id
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - Any insert inside the transaction fails (the whole creation is rolled back)
#[instrument(skip(pool, new_point))]
pub fn create_point(pool: &DbPool, new_point: NewPoint, item_ids: &[i32]) -> Result<Point> {
    debug!("Creating new point with {} item associations", item_ids.len());

    let conn = &mut pool.get()?;

    let point = conn.transaction::<Point, anyhow::Error, _>(|conn| {
        // Insert the point row and read back the assigned id
        let point: Point = diesel::insert_into(points::table)
            .values(&new_point)
            .returning(Point::as_returning())
            .get_result(conn)?;

        // Insert one association row per accepted item
        let associations: Vec<PointItem> = item_ids
            .iter()
            .map(|&item_id| PointItem::new(point.get_id(), item_id))
            .collect();

        diesel::insert_into(point_items::table)
            .values(&associations)
            .execute(conn)?;

        Ok(point)
    })?;

    info!("Successfully created point with id: {}", point.get_id());

    Ok(point)
}

/// Retrieves a point from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `point_id` - The ID of the point to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Point if found, or None if not found
#[instrument(skip(pool))]
pub fn get_point(pool: &DbPool, point_id: i32) -> Result<Option<Point>> {
    debug!("Retrieving point by id");

    let conn = &mut pool.get()?;

    let result = points::table
        .filter(points::id.eq(point_id))
        .select(Point::as_select())
        .first::<Point>(conn)
        .optional()?;

    Ok(result)
}

/// Lists points, optionally filtered by city, state, and accepted items
///
/// Filters are combined conjunctively; an empty filter set returns all
/// points. The item filter keeps any point accepting at least one of the
/// given catalog ids. Results are ordered by insertion (id).
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `city` - Optional city to filter by
/// * `uf` - Optional state abbreviation to filter by
/// * `item_ids` - Catalog ids to filter by; empty means no item filter
///
/// ### Returns
///
/// A Result containing the matching points in insertion order
#[instrument(skip(pool))]
pub fn list_points(
    pool: &DbPool,
    city: Option<&str>,
    uf: Option<&str>,
    item_ids: &[i32],
) -> Result<Vec<Point>> {
    debug!("Listing points");

    let conn = &mut pool.get()?;

    let mut query = points::table.select(Point::as_select()).into_boxed();

    if let Some(city) = city {
        query = query.filter(points::city.eq(city.to_string()));
    }

    if let Some(uf) = uf {
        query = query.filter(points::uf.eq(uf.to_string()));
    }

    if !item_ids.is_empty() {
        // Keep points with at least one association to the requested items
        let matching_points = point_items::table
            .filter(point_items::item_id.eq_any(item_ids.to_vec()))
            .select(point_items::point_id);
        query = query.filter(points::id.eq_any(matching_points));
    }

    let result = query.order(points::id.asc()).load::<Point>(conn)?;

    debug!("Found {} matching points", result.len());

    Ok(result)
}

/// Retrieves the catalog items associated with a point
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `point_id` - The ID of the point whose items to fetch
///
/// ### Returns
///
/// A Result containing the items the point accepts, ordered by catalog id
#[instrument(skip(pool))]
pub fn get_items_for_point(pool: &DbPool, point_id: i32) -> Result<Vec<Item>> {
    debug!("Retrieving items for point");

    let conn = &mut pool.get()?;

    let result = items::table
        .inner_join(point_items::table)
        .filter(point_items::point_id.eq(point_id))
        .order(items::id.asc())
        .select(Item::as_select())
        .load::<Item>(conn)?;

    Ok(result)
}

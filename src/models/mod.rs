/// Data models
///
/// This module contains the structs that map to the database tables:
/// the static item catalog, registered collection points, and the
/// association rows linking a point to the items it accepts.

mod item;
mod point;
mod point_item;

pub use item::Item;
pub use point::{NewPoint, Point};
pub use point_item::PointItem;

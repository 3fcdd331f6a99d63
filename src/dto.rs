use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{Item, Point};

/// Data transfer object for registering a new collection point
///
/// This struct is used to deserialize JSON requests for creating points.
/// The `validator` derive declares the request schema: every violation is
/// collected into a field-level error list before any storage mutation.
/// All fields deserialize with defaults so that an absent field surfaces
/// as a schema violation on that field instead of a deserialization error.
#[derive(Deserialize, Debug, Default, Validate)]
#[serde(default)]
pub struct CreatePointDto {
    /// Name of the organization running the point
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    /// Contact e-mail address
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    /// Contact WhatsApp number
    #[validate(length(min = 1, message = "whatsapp is required"))]
    pub whatsapp: String,

    /// Latitude of the physical location
    #[validate(
        required(message = "latitude is required"),
        range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,

    /// Longitude of the physical location
    #[validate(
        required(message = "longitude is required"),
        range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,

    /// City where the point is located
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,

    /// Brazilian state abbreviation (two letters)
    #[validate(length(min = 2, max = 2, message = "uf must be a two-letter state code"))]
    pub uf: String,

    /// IDs of the catalog items the point accepts
    #[validate(length(min = 1, message = "at least one item must be selected"))]
    pub items: Vec<i32>,

    /// Optional image file name; a configured placeholder is used when absent
    pub image: Option<String>,
}

/// Query parameters accepted by the point listing endpoint
///
/// All filters are optional and combined conjunctively. The `items` filter
/// keeps the comma-separated wire form submitted by the frontend ("1,2").
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct PointQueryDto {
    /// City to filter by
    pub city: Option<String>,

    /// State abbreviation to filter by
    pub uf: Option<String>,

    /// Comma-separated catalog item IDs to filter by
    pub items: Option<String>,
}

impl PointQueryDto {
    /// Parses the `items` filter into catalog item IDs
    ///
    /// An absent filter parses to an empty list. A malformed entry is
    /// reported as a field-level validation error on `items`.
    pub fn item_ids(&self) -> Result<Vec<i32>, ValidationErrors> {
        let Some(raw) = self.items.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i32>())
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|_| {
                let mut error = ValidationError::new("items");
                error.message = Some("items must be a comma-separated list of ids".into());
                let mut errors = ValidationErrors::new();
                errors.add("items".into(), error);
                errors
            })
    }
}

/// A catalog item as returned by the API
///
/// The stored image file name is resolved to an absolute URL against the
/// public assets base at serve time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemResponse {
    pub id: i32,
    pub title: String,
    pub image_url: String,
}

impl ItemResponse {
    /// Builds the response form of a catalog item
    pub fn from_item(item: &Item, uploads_url: &str) -> Self {
        Self {
            id: item.get_id(),
            title: item.get_title(),
            image_url: resolve_image_url(uploads_url, &item.get_image()),
        }
    }
}

/// A collection point as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PointResponse {
    pub id: i32,
    pub image: String,
    pub image_url: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

impl PointResponse {
    /// Builds the response form of a point
    pub fn from_point(point: &Point, uploads_url: &str) -> Self {
        Self {
            id: point.get_id(),
            image: point.get_image(),
            image_url: resolve_image_url(uploads_url, &point.get_image()),
            name: point.get_name(),
            email: point.get_email(),
            whatsapp: point.get_whatsapp(),
            latitude: point.get_latitude(),
            longitude: point.get_longitude(),
            city: point.get_city(),
            uf: point.get_uf(),
        }
    }
}

/// A point together with its resolved catalog items
///
/// This is the response shape of `GET /points/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PointDetailResponse {
    pub point: PointResponse,
    pub items: Vec<ItemResponse>,
}

/// Joins the public assets base URL with a stored image file name
fn resolve_image_url(uploads_url: &str, image: &str) -> String {
    format!("{}/{}", uploads_url.trim_end_matches('/'), image)
}

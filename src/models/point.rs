use diesel::prelude::*;

/// Represents a registered collection point
///
/// This struct maps directly to the `points` table in the database.
/// A point is created by a registration submission and is immutable
/// afterwards: no update or delete endpoints exist.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::points)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Point {
    /// Unique identifier for the point (assigned by the database)
    id: i32,

    /// Bare image file name, resolved to an absolute URL at serve time
    image: String,

    /// Name of the organization running the point
    name: String,

    /// Contact e-mail address
    email: String,

    /// Contact WhatsApp number
    whatsapp: String,

    /// Latitude of the physical location
    latitude: f64,

    /// Longitude of the physical location
    longitude: f64,

    /// City where the point is located
    city: String,

    /// Brazilian state abbreviation
    uf: String,
}

impl Point {
    /// Gets the point's ID
    pub fn get_id(&self) -> i32 {
        self.id
    }

    /// Gets the point's image file name
    pub fn get_image(&self) -> String {
        self.image.clone()
    }

    /// Gets the point's organization name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Gets the point's contact e-mail
    pub fn get_email(&self) -> String {
        self.email.clone()
    }

    /// Gets the point's WhatsApp number
    pub fn get_whatsapp(&self) -> String {
        self.whatsapp.clone()
    }

    /// Gets the point's latitude
    pub fn get_latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the point's longitude
    pub fn get_longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the point's city
    pub fn get_city(&self) -> String {
        self.city.clone()
    }

    /// Gets the point's state abbreviation
    pub fn get_uf(&self) -> String {
        self.uf.clone()
    }
}

/// Insertable form of a point, before the database assigns an id
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::points)]
pub struct NewPoint {
    image: String,
    name: String,
    email: String,
    whatsapp: String,
    latitude: f64,
    longitude: f64,
    city: String,
    uf: String,
}

impl NewPoint {
    /// Creates a new insertable point from its core fields
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        image: String,
        name: String,
        email: String,
        whatsapp: String,
        latitude: f64,
        longitude: f64,
        city: String,
        uf: String,
    ) -> Self {
        Self {
            image,
            name,
            email,
            whatsapp,
            latitude,
            longitude,
            city,
            uf,
        }
    }
}

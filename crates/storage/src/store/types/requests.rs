#![forbid(unsafe_code)]

use super::content::Meta;
use std::time::Duration;

/// Row for any of the four content tables. Fields that a table does not
/// carry must stay unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewContent {
    pub title: String,
    pub url_title: String,
    /// Derived from `url_title` when absent.
    pub slug: Option<String>,
    pub body: Option<String>,
    pub abstract_text: Option<String>,
    pub parent_id: Option<i64>,
    pub author_id: Option<i64>,
    pub published_date: Option<String>,
    pub duration: Option<i64>,
    pub duration_unit: Option<String>,
    pub default_price: Option<f64>,
    pub featured_image: Option<String>,
    pub banner_image: Option<String>,
    pub meta: Meta,
    pub published: bool,
}

impl NewContent {
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            url_title: title.clone(),
            title,
            published: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewItineraryDay {
    pub day_number: i64,
    pub title: String,
    pub description: Option<String>,
    pub meals: Option<String>,
    pub accommodation: Option<String>,
    pub walking_hours: Option<String>,
    pub distance: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub origin_elevation: Option<String>,
    pub destination_elevation: Option<String>,
    pub transportation: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTestimonial {
    pub review_title: String,
    pub slug: Option<String>,
    pub full_name: String,
    pub address: Option<String>,
    pub rating: Option<i64>,
    pub date: String,
    pub description: Option<String>,
    pub published: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewAuthor {
    pub full_name: String,
    pub email: String,
    pub slug: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewMenu {
    pub title: String,
    pub menu_type: String,
    pub parent_id: Option<i64>,
    pub url_segment_type: Option<String>,
    pub url_segment_id: Option<i64>,
    pub url: Option<String>,
    pub display_order: i64,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// `None` leaves the bound to SQLite's own busy timeout.
    pub timeout: Option<Duration>,
}

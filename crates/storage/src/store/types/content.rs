#![forbid(unsafe_code)]

use serde::Serialize;
use tm_core::ContentKind;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub title: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub url: String,
    pub alt: Option<String>,
}

impl ImageRef {
    pub(crate) fn from_columns(url: Option<String>, alt: Option<String>) -> Option<Self> {
        url.filter(|url| !url.trim().is_empty())
            .map(|url| Self { url, alt })
    }
}

/// Columns shared by places, packages, articles and blogs. `body` is
/// `description` for most tables and `details` for packages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntity {
    pub id: i64,
    pub title: String,
    pub url_title: String,
    pub slug: String,
    pub body: Option<String>,
    pub featured_image: Option<ImageRef>,
    pub banner_image: Option<ImageRef>,
    pub meta: Meta,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub title: String,
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
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

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialSummary {
    pub id: i64,
    pub review_title: String,
    pub slug: String,
    pub full_name: String,
    pub address: Option<String>,
    pub rating: Option<i64>,
    pub date: String,
    pub description: Option<String>,
    pub avatar: Option<ImageRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: i64,
    pub full_name: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePage {
    #[serde(flatten)]
    pub entity: ContentEntity,
    pub parent_id: Option<i64>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePage {
    #[serde(flatten)]
    pub entity: ContentEntity,
    pub duration: Option<i64>,
    pub duration_unit: Option<String>,
    pub default_price: Option<f64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub group_size: Option<String>,
    pub max_altitude: Option<String>,
    pub trip_highlights: Option<String>,
    pub cost_include: Option<String>,
    pub cost_exclude: Option<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub testimonials: Vec<TestimonialSummary>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    #[serde(flatten)]
    pub entity: ContentEntity,
    pub parent_id: Option<i64>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    #[serde(flatten)]
    pub entity: ContentEntity,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub published_date: Option<String>,
    pub author: Option<AuthorSummary>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// A resolved slug, one case per rendering branch. Serializes as
/// `{"datatype": "package", "content": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "datatype", content = "content", rename_all = "lowercase")]
pub enum ResolvedContent {
    Place(PlacePage),
    Package(PackagePage),
    Article(ArticlePage),
    Blog(BlogPage),
}

impl ResolvedContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Place(_) => ContentKind::Place,
            Self::Package(_) => ContentKind::Package,
            Self::Article(_) => ContentKind::Article,
            Self::Blog(_) => ContentKind::Blog,
        }
    }

    pub fn datatype(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn entity(&self) -> &ContentEntity {
        match self {
            Self::Place(page) => &page.entity,
            Self::Package(page) => &page.entity,
            Self::Article(page) => &page.entity,
            Self::Blog(page) => &page.entity,
        }
    }

    pub fn slug(&self) -> &str {
        &self.entity().slug
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        match self {
            Self::Place(page) => &page.breadcrumbs,
            Self::Package(page) => &page.breadcrumbs,
            Self::Article(page) => &page.breadcrumbs,
            Self::Blog(page) => &page.breadcrumbs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrerenderFailure {
    pub slug: String,
    pub code: &'static str,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PrerenderBatch {
    pub pages: Vec<ResolvedContent>,
    pub skipped: Vec<PrerenderFailure>,
}

#![forbid(unsafe_code)]

pub mod menu;

pub mod ids {
    use serde::Serialize;

    const MAX_SLUG_LEN: usize = 200;

    /// URL-safe identifier shared by every public content table.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(transparent)]
    pub struct Slug(String);

    impl Slug {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, SlugError> {
            let value = value.into();
            let trimmed = value.trim();
            validate_slug(trimmed)?;
            if trimmed.len() == value.len() {
                Ok(Self(value))
            } else {
                Ok(Self(trimmed.to_string()))
            }
        }
    }

    impl std::fmt::Display for Slug {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum SlugError {
        Empty,
        TooLong,
        EdgeHyphen,
        InvalidChar { ch: char, index: usize },
    }

    impl SlugError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "slug must not be empty",
                Self::TooLong => "slug is too long",
                Self::EdgeHyphen => "slug must not start or end with '-'",
                Self::InvalidChar { .. } => "slug may only contain a-z, 0-9 and '-'",
            }
        }
    }

    fn validate_slug(value: &str) -> Result<(), SlugError> {
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if value.len() > MAX_SLUG_LEN {
            return Err(SlugError::TooLong);
        }
        for (index, ch) in value.chars().enumerate() {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
                continue;
            }
            return Err(SlugError::InvalidChar { ch, index });
        }
        if value.starts_with('-') || value.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }
        Ok(())
    }

    /// Derives a slug from a human title the same way the admin panel does:
    /// lowercase, every run of non `[a-z0-9]` becomes one `-`, edges trimmed.
    pub fn slugify(title: &str) -> Option<Slug> {
        let mut out = String::with_capacity(title.len());
        let mut pending_hyphen = false;
        for ch in title.trim().chars() {
            let lower = ch.to_ascii_lowercase();
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(lower);
            } else {
                pending_hyphen = true;
            }
        }
        if out.len() > MAX_SLUG_LEN {
            out.truncate(MAX_SLUG_LEN);
            while out.ends_with('-') {
                out.pop();
            }
        }
        Slug::try_new(out).ok()
    }
}

pub mod model {
    use serde::Serialize;

    /// The four content tables a public slug may address, in resolution
    /// precedence order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ContentKind {
        Place,
        Package,
        Article,
        Blog,
    }

    impl ContentKind {
        pub const ALL: [ContentKind; 4] = [
            ContentKind::Place,
            ContentKind::Package,
            ContentKind::Article,
            ContentKind::Blog,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                ContentKind::Place => "place",
                ContentKind::Package => "package",
                ContentKind::Article => "article",
                ContentKind::Blog => "blog",
            }
        }

        pub fn table(self) -> &'static str {
            match self {
                ContentKind::Place => "places",
                ContentKind::Package => "packages",
                ContentKind::Article => "articles",
                ContentKind::Blog => "blogs",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            let value = value.trim();
            Self::ALL
                .into_iter()
                .find(|kind| kind.as_str() == value || kind.table() == value)
        }
    }

    impl std::fmt::Display for ContentKind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }
}

pub mod routing {
    use super::ids::Slug;

    /// Top-level segments served by dedicated pages. They never reach the
    /// slug resolver.
    pub const RESERVED_SLUGS: &[&str] = &[
        "about-us",
        "admin",
        "api",
        "articles",
        "authors",
        "blog",
        "blogs",
        "contact",
        "dashboard",
        "login",
        "menus",
        "packages",
        "places",
        "settings",
        "teams",
        "testimonials",
        "trip-facts",
        "users",
    ];

    pub fn is_reserved(value: &str) -> bool {
        let value = value.trim();
        RESERVED_SLUGS.iter().any(|candidate| *candidate == value)
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Route {
        Home,
        Reserved(&'static str),
        Content(Slug),
        Invalid,
    }

    /// Upstream routing for a single path segment.
    pub fn route_segment(segment: &str) -> Route {
        let segment = segment.trim().trim_matches('/');
        if segment.is_empty() {
            return Route::Home;
        }
        if let Some(reserved) = RESERVED_SLUGS
            .iter()
            .copied()
            .find(|candidate| *candidate == segment)
        {
            return Route::Reserved(reserved);
        }
        match Slug::try_new(segment) {
            Ok(slug) => Route::Content(slug),
            Err(_) => Route::Invalid,
        }
    }
}

pub use ids::{Slug, SlugError, slugify};
pub use model::ContentKind;
pub use routing::{RESERVED_SLUGS, Route, is_reserved, route_segment};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slug_validation() {
        assert_eq!(Slug::try_new("").unwrap_err(), SlugError::Empty);
        assert_eq!(Slug::try_new("   ").unwrap_err(), SlugError::Empty);
        assert_eq!(Slug::try_new("-bali").unwrap_err(), SlugError::EdgeHyphen);
        assert_eq!(
            Slug::try_new("Bali").unwrap_err(),
            SlugError::InvalidChar { ch: 'B', index: 0 }
        );
        assert_eq!(
            Slug::try_new("x".repeat(201)).unwrap_err(),
            SlugError::TooLong
        );
        assert_eq!(Slug::try_new(" bali-retreat ").unwrap().as_str(), "bali-retreat");
    }

    #[test]
    fn slugify_matches_admin_rule() {
        assert_eq!(
            slugify("  Everest Base Camp Trek!  ").map(Slug::into_string),
            Some("everest-base-camp-trek".to_string())
        );
        assert_eq!(
            slugify("Bali -- Retreat (7 days)").map(Slug::into_string),
            Some("bali-retreat-7-days".to_string())
        );
        assert_eq!(slugify("!!!"), None);
    }

    #[test]
    fn content_kind_precedence_and_names() {
        assert_eq!(
            ContentKind::ALL.map(ContentKind::as_str),
            ["place", "package", "article", "blog"]
        );
        assert_eq!(ContentKind::parse("packages"), Some(ContentKind::Package));
        assert_eq!(ContentKind::parse("blog"), Some(ContentKind::Blog));
        assert_eq!(ContentKind::parse("testimonial"), None);
    }

    #[test]
    fn reserved_segments_never_route_to_content() {
        assert_eq!(route_segment("blog"), Route::Reserved("blog"));
        assert_eq!(route_segment("/about-us/"), Route::Reserved("about-us"));
        assert_eq!(route_segment(""), Route::Home);
        assert_eq!(route_segment("Bad Slug"), Route::Invalid);
        assert_eq!(
            route_segment("bali-retreat"),
            Route::Content(Slug::try_new("bali-retreat").unwrap())
        );
    }

    proptest! {
        #[test]
        fn slugify_output_is_always_a_valid_slug(title in ".{0,64}") {
            if let Some(slug) = slugify(&title) {
                prop_assert!(Slug::try_new(slug.as_str()).is_ok());
                prop_assert_eq!(slugify(slug.as_str()), Some(slug.clone()));
            }
        }
    }
}

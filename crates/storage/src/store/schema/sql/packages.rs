#![forbid(unsafe_code)]

pub(in crate::store::schema) const PACKAGES: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          duration INTEGER NOT NULL,
          durationUnit TEXT NOT NULL DEFAULT 'days',
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          abstract TEXT,
          details TEXT,
          defaultPrice REAL,
          groupPriceEnabled INTEGER DEFAULT 0 CHECK(groupPriceEnabled IN (0,1)),
          costInclude TEXT,
          costExclude TEXT,
          featuredImage TEXT,
          featuredImageAlt TEXT,
          featuredImageCaption TEXT,
          bannerImage TEXT,
          bannerImageAlt TEXT,
          bannerImageCaption TEXT,
          tripMapImage TEXT,
          tripMapImageAlt TEXT,
          tripMapImageCaption TEXT,
          statusRibbon TEXT,
          groupSize TEXT,
          maxAltitude TEXT,
          tripHighlights TEXT,
          departureNote TEXT,
          goodToKnow TEXT,
          extraFAQs TEXT,
          relatedTrip TEXT,
          itineraryTitle TEXT,
          status INTEGER DEFAULT 1 CHECK(status IN (0,1)),
          featured INTEGER DEFAULT 0 CHECK(featured IN (0,1)),
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL,
          deletedAt TEXT
        );
"#;

pub(in crate::store::schema) const PACKAGE_PLACES: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          packageId INTEGER NOT NULL,
          placeId INTEGER NOT NULL,
          FOREIGN KEY (packageId) REFERENCES packages(id) ON DELETE CASCADE,
          FOREIGN KEY (placeId) REFERENCES places(id) ON DELETE CASCADE,
          UNIQUE(packageId, placeId)
        );
"#;

pub(in crate::store::schema) const PACKAGE_TRIP_FACTS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          packageId INTEGER NOT NULL,
          categorySlug TEXT NOT NULL,
          attributeId INTEGER NOT NULL,
          FOREIGN KEY (packageId) REFERENCES packages(id) ON DELETE CASCADE,
          UNIQUE(packageId, categorySlug)
        );
"#;

// The day-route columns arrived later; see `itinerary_route_fields`.
pub(in crate::store::schema) const PACKAGE_ITINERARY: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          packageId INTEGER NOT NULL,
          dayNumber INTEGER NOT NULL,
          title TEXT NOT NULL,
          description TEXT,
          meals TEXT,
          accommodation TEXT,
          walkingHours TEXT,
          altitude TEXT,
          FOREIGN KEY (packageId) REFERENCES packages(id) ON DELETE CASCADE,
          UNIQUE(packageId, dayNumber)
        );
"#;

pub(in crate::store::schema) const PACKAGE_GROUP_PRICING: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          packageId INTEGER NOT NULL,
          minPerson INTEGER NOT NULL,
          maxPerson INTEGER NOT NULL,
          price REAL NOT NULL,
          FOREIGN KEY (packageId) REFERENCES packages(id) ON DELETE CASCADE,
          CHECK(minPerson <= maxPerson)
        );
"#;

pub(in crate::store::schema) const PACKAGE_GALLERY: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          packageId INTEGER NOT NULL,
          imageUrl TEXT NOT NULL,
          caption TEXT,
          FOREIGN KEY (packageId) REFERENCES packages(id) ON DELETE CASCADE
        );
"#;

pub(in crate::store::schema) const PACKAGE_ATTRIBUTES: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL,
          type TEXT NOT NULL,
          createdAt TEXT,
          updatedAt TEXT
        );
"#;

pub(in crate::store::schema) const TRIP_FACT_CATEGORIES: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          label TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          createdAt TEXT,
          updatedAt TEXT
        );
"#;

pub(in crate::store::schema) const PACKAGE_TESTIMONIALS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          packageId INTEGER NOT NULL,
          testimonialId INTEGER NOT NULL,
          FOREIGN KEY (packageId) REFERENCES packages(id) ON DELETE CASCADE,
          FOREIGN KEY (testimonialId) REFERENCES testimonials(id) ON DELETE CASCADE,
          UNIQUE(packageId, testimonialId)
        );
"#;

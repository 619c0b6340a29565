#![forbid(unsafe_code)]

pub(in crate::store::schema) const USERS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL,
          email TEXT NOT NULL UNIQUE,
          password TEXT NOT NULL,
          userType TEXT NOT NULL CHECK(userType IN ('super-user','admin')),
          status INTEGER NOT NULL CHECK(status IN (0,1)),
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL
        );
"#;

pub(in crate::store::schema) const TESTIMONIALS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          reviewTitle TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          fullName TEXT NOT NULL,
          address TEXT,
          teamId INTEGER,
          date TEXT NOT NULL,
          credit TEXT,
          rating INTEGER,
          status INTEGER DEFAULT 0,
          isFeatured INTEGER DEFAULT 0,
          description TEXT,
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          avatar TEXT,
          avatarAlt TEXT,
          avatarCaption TEXT,
          deletedAt TEXT,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL
        );
"#;

pub(in crate::store::schema) const MENUS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          type TEXT NOT NULL,
          parentId INTEGER,
          urlSegmentType TEXT,
          urlSegmentId INTEGER,
          url TEXT,
          status INTEGER DEFAULT 1,
          displayOrder INTEGER DEFAULT 0,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL
        );
"#;

pub(in crate::store::schema) const SETTINGS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          viatorLink TEXT,
          tourradarLink TEXT,
          tripAdvisorLink TEXT,
          defaultMetaDescription TEXT,
          defaultMetaKeywords TEXT,
          defaultMetaTitle TEXT,
          youtubeLink TEXT,
          pinterestLink TEXT,
          linkedinLink TEXT,
          instagramLink TEXT,
          twitterLink TEXT,
          facebookLink TEXT,
          contactPerson1 TEXT,
          contactPerson2 TEXT,
          establishedYear TEXT,
          shortDescription TEXT,
          mobileNumber1 TEXT,
          mobileNumber2 TEXT,
          phoneNumber TEXT,
          postBox TEXT,
          address TEXT,
          googleMapLocation TEXT,
          companyName TEXT,
          updatedAt TEXT
        );
"#;

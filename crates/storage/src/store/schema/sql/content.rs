#![forbid(unsafe_code)]

pub(in crate::store::schema) const PLACES: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          parentId INTEGER,
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          description TEXT,
          featuredImage TEXT,
          featuredImageAlt TEXT,
          featuredImageCaption TEXT,
          bannerImage TEXT,
          bannerImageAlt TEXT,
          bannerImageCaption TEXT,
          status INTEGER DEFAULT 0,
          deletedAt TEXT,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL,
          FOREIGN KEY (parentId) REFERENCES places(id)
        );
"#;

pub(in crate::store::schema) const ARTICLES: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          parentId INTEGER,
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          description TEXT,
          featuredImage TEXT,
          featuredImageAlt TEXT,
          featuredImageCaption TEXT,
          bannerImage TEXT,
          bannerImageAlt TEXT,
          bannerImageCaption TEXT,
          status INTEGER DEFAULT 0,
          deletedAt TEXT,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL,
          FOREIGN KEY (parentId) REFERENCES articles(id)
        );
"#;

pub(in crate::store::schema) const AUTHORS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          fullName TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          email TEXT NOT NULL UNIQUE,
          description TEXT,
          avatar TEXT,
          avatarCaption TEXT,
          bannerImage TEXT,
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          status INTEGER DEFAULT 1,
          deletedAt TEXT,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL
        );
"#;

pub(in crate::store::schema) const TEAMS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          fullName TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          email TEXT NOT NULL UNIQUE,
          description TEXT,
          avatar TEXT,
          avatarAlt TEXT,
          avatarCaption TEXT,
          bannerImage TEXT,
          bannerImageAlt TEXT,
          bannerImageCaption TEXT,
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          status INTEGER DEFAULT 1,
          deletedAt TEXT,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL
        );
"#;

pub(in crate::store::schema) const BLOGS: &str = r#"
        CREATE TABLE IF NOT EXISTS {table} (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          urlTitle TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          authorId INTEGER,
          publishedDate TEXT,
          status INTEGER DEFAULT 0,
          isFeatured INTEGER DEFAULT 0,
          abstract TEXT,
          description TEXT,
          metaTitle TEXT,
          metaKeywords TEXT,
          metaDescription TEXT,
          featuredImage TEXT,
          featuredImageAlt TEXT,
          featuredImageCaption TEXT,
          bannerImage TEXT,
          bannerImageAlt TEXT,
          bannerImageCaption TEXT,
          deletedAt TEXT,
          createdAt TEXT NOT NULL,
          updatedAt TEXT NOT NULL,
          FOREIGN KEY (authorId) REFERENCES authors(id)
        );
"#;

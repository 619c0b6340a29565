#![forbid(unsafe_code)]

mod common;

use common::{Site, column_names, slug};
use rusqlite::Connection;
use tm_core::ContentKind;
use tm_storage::{
    ChangeOutcome, MigrationError, NewContent, ResolveOptions, ResolvedContent, StoreError,
};

const LEGACY_AUTHORS: &str = r#"
    CREATE TABLE authors (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      fullName TEXT NOT NULL,
      urlTitle TEXT NOT NULL,
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

const AUTHOR_ROWS: &str = r#"
    INSERT INTO authors (fullName, urlTitle, email, description, avatar, status, deletedAt, createdAt, updatedAt) VALUES
      ('Pemba Sherpa', 'pemba-sherpa', 'pemba@example.com', 'Guide since 2004', '/img/pemba.jpg', 1, NULL, '2023-03-01T08:00:00Z', '2023-03-02T08:00:00Z'),
      ('Maya Rai', 'maya-rai', 'maya@example.com', NULL, NULL, 0, NULL, '2023-04-01T08:00:00Z', '2023-04-01T08:00:00Z'),
      ('Old Account', 'old-account', 'old@example.com', 'gone', NULL, 1, '2023-05-01T00:00:00Z', '2023-01-01T08:00:00Z', '2023-05-01T00:00:00Z');
"#;

const LEGACY_MENUS: &str = r#"
    CREATE TABLE menus (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      parentId INTEGER,
      url TEXT,
      status INTEGER DEFAULT 1,
      displayOrder INTEGER DEFAULT 0
    );
    INSERT INTO menus (title, parentId, url, status, displayOrder) VALUES
      ('Trekking', NULL, '/trekking', 1, 1),
      ('Everest Region', 1, '/everest', 1, 0);
"#;

type AuthorRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    i64,
    Option<String>,
    String,
    String,
);

fn author_rows(conn: &Connection) -> Vec<AuthorRow> {
    conn.prepare(
        "SELECT id, fullName, urlTitle, email, description, avatar, status, deletedAt, createdAt, updatedAt
         FROM authors ORDER BY id",
    )
    .expect("prepare")
    .query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
            row.get(9)?,
        ))
    })
    .expect("query")
    .collect::<Result<_, _>>()
    .expect("rows")
}

fn table_names(conn: &Connection) -> Vec<String> {
    conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows")
}

#[test]
fn authors_slug_rebuild_preserves_rows_and_foreign_keys() {
    let mut site = Site::legacy(&format!("{LEGACY_AUTHORS}{AUTHOR_ROWS}"));
    site.apply(&["create_blogs"]);

    let mut post = NewContent::titled("Packing for Everest");
    post.author_id = Some(1);
    site.store
        .insert_content(ContentKind::Blog, post)
        .expect("insert blog");

    let before = author_rows(&site.raw());
    let report = site.store.schema_apply("authors_slug").expect("rebuild");
    assert_eq!(report.outcome, ChangeOutcome::Applied);
    assert_eq!(report.rows_before, Some(3));
    assert_eq!(report.rows_after, Some(3));

    let raw = site.raw();
    assert_eq!(author_rows(&raw), before);
    let slugs: Vec<(String, String)> = raw
        .prepare("SELECT slug, urlTitle FROM authors ORDER BY id")
        .expect("prepare")
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows");
    assert!(slugs.iter().all(|(slug, url_title)| slug == url_title));
    assert!(!table_names(&raw).iter().any(|name| name.starts_with("authors_")));
    let violations = raw
        .prepare("PRAGMA foreign_key_check")
        .expect("prepare")
        .query_map([], |_| Ok(()))
        .expect("query")
        .count();
    assert_eq!(violations, 0);

    let resolved = site
        .store
        .resolve_slug(&slug("packing-for-everest"), ResolveOptions::default())
        .expect("resolve blog");
    let ResolvedContent::Blog(page) = resolved else {
        panic!("expected a blog");
    };
    let author = page.author.expect("author summary");
    assert_eq!(author.slug, "pemba-sherpa");

    // foreign_keys is back on for the store handle after the rebuild.
    let mut orphan = NewContent::titled("Ghost Post");
    orphan.author_id = Some(999);
    let err = site
        .store
        .insert_content(ContentKind::Blog, orphan)
        .expect_err("unknown author must be rejected");
    assert!(matches!(err, StoreError::Sql(_)));

    let again = site.store.schema_apply("authors_slug").expect("second run");
    assert_eq!(again.outcome, ChangeOutcome::AlreadyApplied);
    site.apply(&["authors_avatar_alt", "authors_banner_fields"]);
    let again = site.store.schema_apply("authors_slug").expect("third run");
    assert_eq!(again.outcome, ChangeOutcome::AlreadyApplied);
}

#[test]
fn failed_rebuild_rolls_back_completely() {
    let seed = format!(
        "{LEGACY_AUTHORS}
         INSERT INTO authors (fullName, urlTitle, email, createdAt, updatedAt) VALUES
           ('Pemba Sherpa', 'pemba', 'pemba@example.com', '2023-03-01', '2023-03-01'),
           ('Pemba Tamang', 'pemba', 'tamang@example.com', '2023-03-02', '2023-03-02');"
    );
    let mut site = Site::legacy(&seed);
    let before = author_rows(&site.raw());
    let columns = column_names(&site.store, "authors");

    let err = site
        .store
        .schema_apply("authors_slug")
        .expect_err("duplicate urlTitle violates slug uniqueness");
    assert_eq!(err.code(), "SCHEMA_ERROR");
    assert!(matches!(err, MigrationError::Schema { change: "authors_slug", .. }));

    let raw = site.raw();
    assert_eq!(author_rows(&raw), before);
    assert_eq!(column_names(&site.store, "authors"), columns);
    assert!(!table_names(&raw).contains(&"authors__rebuild".to_string()));

    // Nothing was left behind, so a fixed table rebuilds cleanly.
    raw.execute("UPDATE authors SET urlTitle = 'pemba-tamang' WHERE id = 2", [])
        .expect("fix duplicate");
    let report = site.store.schema_apply("authors_slug").expect("rebuild");
    assert_eq!(report.rows_after, Some(2));
}

#[test]
fn leftover_intermediate_table_is_surfaced() {
    let seed = format!(
        "{LEGACY_AUTHORS}{AUTHOR_ROWS}
         CREATE TABLE authors_old (id INTEGER PRIMARY KEY, fullName TEXT);"
    );
    let mut site = Site::legacy(&seed);

    let err = site
        .store
        .schema_apply("authors_slug")
        .expect_err("intermediate table present");
    assert_eq!(err.code(), "SCHEMA_ERROR");
    match err {
        MigrationError::IntermediateState { change, table } => {
            assert_eq!(change, "authors_slug");
            assert_eq!(table, "authors_old");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!column_names(&site.store, "authors").contains(&"slug".to_string()));
    assert!(site.store.table_exists("authors_old").expect("table_exists"));
}

#[test]
fn menus_rebuild_fills_type_and_timestamps() {
    let mut site = Site::legacy(LEGACY_MENUS);
    let report = site.store.schema_apply("menus_rebuild").expect("rebuild menus");
    assert_eq!(report.outcome, ChangeOutcome::Applied);
    assert_eq!(report.rows_after, Some(2));

    let rows: Vec<(String, String, Option<String>, Option<String>)> = site
        .raw()
        .prepare("SELECT title, type, createdAt, urlSegmentType FROM menus ORDER BY id")
        .expect("prepare")
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows");
    assert_eq!(rows.len(), 2);
    for (_, menu_type, created_at, segment_type) in &rows {
        assert_eq!(menu_type, "header");
        assert!(created_at.is_some());
        assert!(segment_type.is_none());
    }

    site.apply(&["menus_deleted_at"]);
    let tree = site.store.menu_tree("header").expect("menu tree");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].node.title, "Trekking");
    assert_eq!(tree[0].children[0].node.title, "Everest Region");
}

#[test]
fn leftover_rebuild_staging_table_blocks_menus_rebuild() {
    let seed = format!("{LEGACY_MENUS}\nCREATE TABLE menus__rebuild (id INTEGER PRIMARY KEY);");
    let mut site = Site::legacy(&seed);
    let err = site
        .store
        .schema_apply("menus_rebuild")
        .expect_err("staging table present");
    assert!(matches!(
        err,
        MigrationError::IntermediateState { ref table, .. } if table == "menus__rebuild"
    ));
}

#[test]
fn authors_slug_rebuild_keeps_columns_the_new_shape_does_not_declare() {
    let seed = format!(
        "{LEGACY_AUTHORS}{AUTHOR_ROWS}
         ALTER TABLE authors ADD COLUMN avatarAlt TEXT;
         ALTER TABLE authors ADD COLUMN bannerImageCaption TEXT;
         UPDATE authors SET avatarAlt = 'Pemba portrait', bannerImageCaption = 'Khumbu icefall' WHERE id = 1;"
    );
    let mut site = Site::legacy(&seed);

    let report = site.store.schema_apply("authors_slug").expect("rebuild");
    assert_eq!(report.outcome, ChangeOutcome::Applied);
    assert_eq!(report.rows_after, Some(3));

    let kept: Vec<(Option<String>, Option<String>)> = site
        .raw()
        .prepare("SELECT avatarAlt, bannerImageCaption FROM authors ORDER BY id")
        .expect("prepare")
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows");
    assert_eq!(
        kept,
        vec![
            (
                Some("Pemba portrait".to_string()),
                Some("Khumbu icefall".to_string())
            ),
            (None, None),
            (None, None),
        ]
    );

    let avatar_alt = site
        .store
        .schema_apply("authors_avatar_alt")
        .expect("avatar alt");
    assert_eq!(avatar_alt.outcome, ChangeOutcome::AlreadyApplied);
}

#[test]
fn menus_rebuild_keeps_soft_delete_markers() {
    let seed = format!(
        "{LEGACY_MENUS}
         ALTER TABLE menus ADD COLUMN deletedAt TEXT;
         UPDATE menus SET deletedAt = '2024-01-01T00:00:00Z' WHERE id = 2;"
    );
    let mut site = Site::legacy(&seed);
    site.store.schema_apply("menus_rebuild").expect("rebuild menus");

    let deleted: Vec<Option<String>> = site
        .raw()
        .prepare("SELECT deletedAt FROM menus ORDER BY id")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows");
    assert_eq!(deleted, vec![None, Some("2024-01-01T00:00:00Z".to_string())]);

    let report = site.store.schema_apply("menus_deleted_at").expect("deleted at");
    assert_eq!(report.outcome, ChangeOutcome::AlreadyApplied);
    let tree = site.store.menu_tree("header").expect("menu tree");
    assert_eq!(tree.len(), 1);
    assert!(tree[0].children.is_empty());
}

#[test]
fn rebuild_checks_foreign_keys_of_referencing_tables() {
    let seed = format!(
        "{LEGACY_AUTHORS}{AUTHOR_ROWS}
         CREATE TABLE blogs (
           id INTEGER PRIMARY KEY AUTOINCREMENT,
           title TEXT NOT NULL,
           authorId INTEGER REFERENCES authors(id)
         );
         INSERT INTO blogs (title, authorId) VALUES ('Lost Post', 99);"
    );
    let mut site = Site::legacy(&seed);
    let before = author_rows(&site.raw());

    let err = site
        .store
        .schema_apply("authors_slug")
        .expect_err("dangling blog author");
    assert_eq!(err.code(), "SCHEMA_ERROR");
    assert!(matches!(
        err,
        MigrationError::ForeignKeyViolation {
            change: "authors_slug",
            violations: 1
        }
    ));

    let raw = site.raw();
    assert_eq!(author_rows(&raw), before);
    assert!(!column_names(&site.store, "authors").contains(&"slug".to_string()));
    assert!(!table_names(&raw).contains(&"authors__rebuild".to_string()));
}

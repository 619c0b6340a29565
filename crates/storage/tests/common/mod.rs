#![forbid(unsafe_code)]
#![allow(dead_code)]

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;
use tm_core::{ContentKind, Slug};
use tm_storage::{NewContent, NewItineraryDay, NewTestimonial, SqliteStore};

pub struct Site {
    pub dir: TempDir,
    pub store: SqliteStore,
}

impl Site {
    /// File-backed store with the whole catalog applied.
    pub fn fresh() -> Self {
        let site = Self::empty();
        let Site { dir, mut store } = site;
        store.schema_apply_pending().expect("apply catalog");
        Site { dir, store }
    }

    /// File-backed store with no tables at all.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SqliteStore::open(dir.path().join("users.db")).expect("open store");
        Site { dir, store }
    }

    /// Store over a database seeded through `seed` before the store opens.
    pub fn legacy(seed: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("users.db");
        {
            let conn = Connection::open(&path).expect("open raw db");
            conn.execute_batch(seed).expect("seed legacy schema");
        }
        let store = SqliteStore::open(&path).expect("open store");
        Site { dir, store }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("users.db")
    }

    /// Second handle for writes the store API refuses on purpose.
    pub fn raw(&self) -> Connection {
        Connection::open(self.db_path()).expect("open raw db")
    }

    pub fn apply(&mut self, names: &[&str]) {
        for name in names {
            self.store
                .schema_apply(name)
                .unwrap_or_else(|err| panic!("apply {name}: {err}"));
        }
    }

    pub fn place(&mut self, title: &str, parent_id: Option<i64>) -> i64 {
        let mut request = NewContent::titled(title);
        request.parent_id = parent_id;
        self.store
            .insert_content(ContentKind::Place, request)
            .expect("insert place")
    }

    pub fn package(&mut self, title: &str, duration: i64) -> i64 {
        let mut request = NewContent::titled(title);
        request.duration = Some(duration);
        request.default_price = Some(1250.0);
        self.store
            .insert_content(ContentKind::Package, request)
            .expect("insert package")
    }

    pub fn day(&mut self, package_id: i64, day_number: i64) -> i64 {
        self.store
            .add_itinerary_day(
                package_id,
                NewItineraryDay {
                    day_number,
                    title: format!("Day {day_number}"),
                    ..NewItineraryDay::default()
                },
            )
            .expect("add itinerary day")
    }

    pub fn testimonial(&mut self, title: &str, date: &str, published: bool) -> i64 {
        self.store
            .insert_testimonial(NewTestimonial {
                review_title: title.to_string(),
                full_name: "Asha Gurung".to_string(),
                rating: Some(5),
                date: date.to_string(),
                published,
                ..NewTestimonial::default()
            })
            .expect("insert testimonial")
    }
}

pub fn slug(value: &str) -> Slug {
    Slug::try_new(value).expect("valid slug")
}

pub fn column_names(store: &SqliteStore, table: &str) -> Vec<String> {
    store
        .table_columns(table)
        .expect("table columns")
        .into_iter()
        .map(|column| column.name)
        .collect()
}

#![forbid(unsafe_code)]

mod common;

use common::Site;
use std::time::Duration;
use tm_core::ContentKind;
use tm_storage::{NewContent, ResolveOptions};

fn seeded_site() -> Site {
    let mut site = Site::fresh();
    site.place("Nepal", None);
    site.package("Bali Retreat", 7);
    site.package("Annapurna Circuit", 14);
    let mut draft = NewContent::titled("Hidden Valley");
    draft.published = false;
    site.store
        .insert_content(ContentKind::Article, draft)
        .expect("insert draft");

    // Rows the admin panel once let through: a reserved slug and a malformed one.
    site.raw()
        .execute_batch(
            "INSERT INTO places (title, urlTitle, slug, status, createdAt, updatedAt)
             VALUES ('Blog', 'Blog', 'blog', 1, '2024-01-01', '2024-01-01');
             INSERT INTO articles (title, urlTitle, slug, status, createdAt, updatedAt)
             VALUES ('Bad', 'Bad Slug', 'Bad Slug', 1, '2024-01-01', '2024-01-01');",
        )
        .expect("seed raw rows");
    site
}

#[test]
fn prerender_skips_failures_and_keeps_going() {
    let site = seeded_site();
    let batch = site
        .store
        .prerender(10, ResolveOptions::default())
        .expect("prerender");

    let slugs: Vec<&str> = batch.pages.iter().map(|page| page.slug()).collect();
    assert_eq!(slugs, vec!["annapurna-circuit", "bali-retreat", "nepal"]);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].slug, "Bad Slug");
    assert_eq!(batch.skipped[0].code, "INVALID_SLUG");
}

#[test]
fn prerender_limit_counts_slugs_not_pages() {
    let site = seeded_site();
    let batch = site
        .store
        .prerender(2, ResolveOptions::default())
        .expect("prerender");
    assert_eq!(batch.pages.len() + batch.skipped.len(), 2);
    assert_eq!(batch.pages[0].slug(), "annapurna-circuit");

    let none = site
        .store
        .prerender(0, ResolveOptions::default())
        .expect("prerender");
    assert!(none.pages.is_empty() && none.skipped.is_empty());
}

#[test]
fn reserved_slugs_are_never_enumerated() {
    let site = seeded_site();
    let slugs = site.store.eligible_slugs(100).expect("eligible slugs");
    assert!(!slugs.iter().any(|slug| slug == "blog"));
    assert!(!slugs.iter().any(|slug| slug == "hidden-valley"));
}

#[test]
fn timeouts_are_recorded_per_slug() {
    let site = seeded_site();
    let batch = site
        .store
        .prerender(
            10,
            ResolveOptions {
                timeout: Some(Duration::ZERO),
            },
        )
        .expect("batch still completes");
    assert!(batch.pages.is_empty());
    assert_eq!(batch.skipped.len(), 4);
    assert!(
        batch
            .skipped
            .iter()
            .filter(|failure| failure.slug != "Bad Slug")
            .all(|failure| failure.code == "TIMEOUT")
    );
}

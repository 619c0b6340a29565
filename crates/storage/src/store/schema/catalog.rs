#![forbid(unsafe_code)]

use super::sql;
use crate::store::types::{ChangeStep, ColumnDef, ColumnFill, SchemaChange};

const fn create(
    name: &'static str,
    table: &'static str,
    ddl: &'static str,
    depends_on: &'static [&'static str],
) -> SchemaChange {
    SchemaChange {
        name,
        table,
        summary: "create table",
        depends_on,
        step: ChangeStep::CreateTable { ddl },
    }
}

const fn add_columns(
    name: &'static str,
    table: &'static str,
    summary: &'static str,
    depends_on: &'static [&'static str],
    columns: &'static [ColumnDef],
) -> SchemaChange {
    SchemaChange {
        name,
        table,
        summary,
        depends_on,
        step: ChangeStep::AddColumns { columns },
    }
}

const fn column(name: &'static str, decl: &'static str) -> ColumnDef {
    ColumnDef { name, decl }
}

const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Baseline tables first, then later evolutions in the order they shipped.
/// `schema_apply_pending` walks this list front to back.
pub(super) static CATALOG: &[SchemaChange] = &[
    create("create_users", "users", sql::USERS, &[]),
    create("create_places", "places", sql::PLACES, &[]),
    create("create_articles", "articles", sql::ARTICLES, &[]),
    create("create_authors", "authors", sql::AUTHORS, &[]),
    create("create_teams", "teams", sql::TEAMS, &[]),
    create("create_blogs", "blogs", sql::BLOGS, &["create_authors"]),
    create("create_packages", "packages", sql::PACKAGES, &[]),
    create(
        "create_package_places",
        "package_places",
        sql::PACKAGE_PLACES,
        &["create_packages", "create_places"],
    ),
    create(
        "create_package_trip_facts",
        "package_trip_facts",
        sql::PACKAGE_TRIP_FACTS,
        &["create_packages"],
    ),
    create(
        "create_package_itinerary",
        "package_itinerary",
        sql::PACKAGE_ITINERARY,
        &["create_packages"],
    ),
    create(
        "create_package_group_pricing",
        "package_group_pricing",
        sql::PACKAGE_GROUP_PRICING,
        &["create_packages"],
    ),
    create(
        "create_package_gallery",
        "package_gallery",
        sql::PACKAGE_GALLERY,
        &["create_packages"],
    ),
    create(
        "create_package_attributes",
        "package_attributes",
        sql::PACKAGE_ATTRIBUTES,
        &[],
    ),
    create(
        "create_trip_fact_categories",
        "trip_fact_categories",
        sql::TRIP_FACT_CATEGORIES,
        &[],
    ),
    create("create_testimonials", "testimonials", sql::TESTIMONIALS, &[]),
    create(
        "create_package_testimonials",
        "package_testimonials",
        sql::PACKAGE_TESTIMONIALS,
        &["create_packages", "create_testimonials"],
    ),
    create("create_menus", "menus", sql::MENUS, &[]),
    create("create_settings", "settings", sql::SETTINGS, &[]),
    add_columns(
        "places_is_featured",
        "places",
        "flag places for the home page",
        &["create_places"],
        &[column(
            "isFeatured",
            "INTEGER DEFAULT 0 CHECK(isFeatured IN (0,1))",
        )],
    ),
    add_columns(
        "places_page_type",
        "places",
        "page template selector",
        &["create_places"],
        &[column("pageType", "TEXT DEFAULT 'default'")],
    ),
    add_columns(
        "articles_page_type",
        "articles",
        "page template selector",
        &["create_articles"],
        &[column("pageType", "TEXT DEFAULT 'default'")],
    ),
    add_columns(
        "blogs_page_type",
        "blogs",
        "page template selector",
        &["create_blogs"],
        &[column("pageType", "TEXT DEFAULT 'default'")],
    ),
    add_columns(
        "packages_page_type",
        "packages",
        "page template selector",
        &["create_packages"],
        &[column("pageType", "TEXT DEFAULT 'package'")],
    ),
    add_columns(
        "articles_deleted_at",
        "articles",
        "soft delete for articles",
        &["create_articles"],
        &[column("deletedAt", "TEXT")],
    ),
    SchemaChange {
        name: "authors_slug",
        table: "authors",
        summary: "rebuild authors with a unique slug seeded from urlTitle",
        depends_on: &["create_authors"],
        step: ChangeStep::RebuildTable {
            ddl: sql::AUTHORS,
            fills: &[ColumnFill {
                column: "slug",
                expr: "urlTitle",
            }],
        },
    },
    add_columns(
        "authors_avatar_alt",
        "authors",
        "alt text for author avatars",
        &["authors_slug"],
        &[column("avatarAlt", "TEXT")],
    ),
    add_columns(
        "authors_banner_fields",
        "authors",
        "alt text and caption for author banners",
        &["authors_slug"],
        &[
            column("bannerImageAlt", "TEXT"),
            column("bannerImageCaption", "TEXT"),
        ],
    ),
    add_columns(
        "itinerary_route_fields",
        "package_itinerary",
        "per-day route details",
        &["create_package_itinerary"],
        &[
            column("distance", "TEXT"),
            column("origin", "TEXT"),
            column("destination", "TEXT"),
            column("originElevation", "TEXT"),
            column("destinationElevation", "TEXT"),
            column("transportation", "TEXT"),
        ],
    ),
    add_columns(
        "testimonials_is_bestselling",
        "testimonials",
        "bestselling badge on testimonials",
        &["create_testimonials"],
        &[column(
            "isBestselling",
            "INTEGER DEFAULT 0 CHECK(isBestselling IN (0,1))",
        )],
    ),
    add_columns(
        "testimonials_package_id",
        "testimonials",
        "legacy single-package link on testimonials",
        &["create_testimonials"],
        &[column("packageId", "INTEGER")],
    ),
    add_columns(
        "trip_fact_categories_is_default",
        "trip_fact_categories",
        "built-in trip fact categories",
        &["create_trip_fact_categories"],
        &[column("isDefault", "INTEGER DEFAULT 0")],
    ),
    SchemaChange {
        name: "trip_fact_categories_mark_defaults",
        table: "trip_fact_categories",
        summary: "mark the five built-in categories as defaults",
        depends_on: &["trip_fact_categories_is_default"],
        step: ChangeStep::Backfill {
            pending_sql: "SELECT COUNT(*) FROM trip_fact_categories \
                 WHERE slug IN ('grade', 'style', 'transportation', 'accommodation', 'meals') \
                   AND COALESCE(isDefault, 0) <> 1",
            apply_sql: "UPDATE trip_fact_categories SET isDefault = 1 \
                 WHERE slug IN ('grade', 'style', 'transportation', 'accommodation', 'meals') \
                   AND COALESCE(isDefault, 0) <> 1",
        },
    },
    SchemaChange {
        name: "package_testimonials_from_legacy_links",
        table: "package_testimonials",
        summary: "copy testimonials.packageId links into the join table",
        depends_on: &[
            "create_packages",
            "create_package_testimonials",
            "testimonials_package_id",
        ],
        step: ChangeStep::Backfill {
            pending_sql: "SELECT COUNT(*) FROM testimonials t \
                 WHERE t.packageId IS NOT NULL \
                   AND EXISTS (SELECT 1 FROM packages p WHERE p.id = t.packageId) \
                   AND NOT EXISTS (SELECT 1 FROM package_testimonials pt \
                                   WHERE pt.packageId = t.packageId AND pt.testimonialId = t.id)",
            apply_sql: "INSERT OR IGNORE INTO package_testimonials (packageId, testimonialId) \
                 SELECT t.packageId, t.id FROM testimonials t \
                 WHERE t.packageId IS NOT NULL \
                   AND EXISTS (SELECT 1 FROM packages p WHERE p.id = t.packageId)",
        },
    },
    SchemaChange {
        name: "menus_rebuild",
        table: "menus",
        summary: "rebuild menus into the typed, segment-linked shape",
        depends_on: &["create_menus"],
        step: ChangeStep::RebuildTable {
            ddl: sql::MENUS,
            fills: &[
                ColumnFill {
                    column: "type",
                    expr: "'header'",
                },
                ColumnFill {
                    column: "createdAt",
                    expr: NOW,
                },
                ColumnFill {
                    column: "updatedAt",
                    expr: NOW,
                },
            ],
        },
    },
    add_columns(
        "menus_deleted_at",
        "menus",
        "soft delete for menus",
        &["menus_rebuild"],
        &[column("deletedAt", "TEXT")],
    ),
];

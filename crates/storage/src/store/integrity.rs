#![forbid(unsafe_code)]

use super::SqliteStore;
use super::error::StoreError;
use super::menus::{MenuFilter, load_menu_nodes};
use super::support::{TableShape, quote_ident, table_exists, text_at};
use super::types::{BrokenMenuLink, DuplicateMenu, IntegrityReport, MenuRef, SlugCollision};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::{BTreeMap, HashSet};
use tm_core::ContentKind;
use tm_core::menu::{MenuNode, find_cycles};
use tracing::{info, warn};

impl SqliteStore {
    /// Read-only sweep for data the admin panel can leave behind: orphaned
    /// and cyclic menus, menu links to missing content, duplicate menus and
    /// slugs shared between content tables.
    pub fn integrity_report(&self) -> Result<IntegrityReport, StoreError> {
        let menus = load_menu_nodes(&self.conn, MenuFilter::Live)?;
        let report = IntegrityReport {
            orphaned_menus: orphaned_menus(&menus),
            cyclic_menus: find_cycles(&menus),
            broken_menu_links: broken_menu_links(&self.conn, &menus)?,
            slug_collisions: slug_collisions(&self.conn)?,
            duplicate_menus: duplicate_menus(&self.conn)?,
        };

        if report.is_clean() {
            info!("integrity check clean");
        } else {
            warn!(
                orphaned_menus = report.orphaned_menus.len(),
                cyclic_menus = report.cyclic_menus.len(),
                broken_menu_links = report.broken_menu_links.len(),
                slug_collisions = report.slug_collisions.len(),
                duplicate_menus = report.duplicate_menus.len(),
                "integrity check found problems"
            );
        }
        Ok(report)
    }
}

fn orphaned_menus(menus: &[MenuNode]) -> Vec<MenuRef> {
    let ids: HashSet<i64> = menus.iter().map(|menu| menu.id).collect();
    menus
        .iter()
        .filter(|menu| menu.parent_id.is_some_and(|parent| !ids.contains(&parent)))
        .map(|menu| MenuRef {
            id: menu.id,
            title: menu.title.clone(),
            parent_id: menu.parent_id,
        })
        .collect()
}

fn broken_menu_links(
    conn: &Connection,
    menus: &[MenuNode],
) -> Result<Vec<BrokenMenuLink>, StoreError> {
    let mut broken = Vec::new();
    for menu in menus {
        // Free-form segment types (custom pages, external urls) are not checked.
        let Some(kind) = menu.url_segment_type.as_deref().and_then(ContentKind::parse) else {
            continue;
        };
        let exists = match menu.url_segment_id {
            Some(id) if table_exists(conn, kind.table())? => conn
                .query_row(
                    &format!(
                        "SELECT 1 FROM {} WHERE \"id\" = ?1",
                        quote_ident(kind.table())
                    ),
                    params![id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some(),
            _ => false,
        };
        if !exists {
            broken.push(BrokenMenuLink {
                id: menu.id,
                title: menu.title.clone(),
                url_segment_type: kind.as_str().to_string(),
                url_segment_id: menu.url_segment_id,
            });
        }
    }
    Ok(broken)
}

fn slug_collisions(conn: &Connection) -> Result<Vec<SlugCollision>, StoreError> {
    let mut owners: BTreeMap<String, Vec<ContentKind>> = BTreeMap::new();
    for kind in ContentKind::ALL {
        let Some(shape) = TableShape::load(conn, kind.table())? else {
            continue;
        };
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT \"slug\" FROM {} WHERE COALESCE(\"slug\", '') <> ''",
            shape.table()
        ))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            if let Some(slug) = text_at(row, 0)? {
                owners.entry(slug).or_default().push(kind);
            }
        }
    }
    Ok(owners
        .into_iter()
        .filter(|(_, kinds)| kinds.len() > 1)
        .map(|(slug, owners)| SlugCollision { slug, owners })
        .collect())
}

fn duplicate_menus(conn: &Connection) -> Result<Vec<DuplicateMenu>, StoreError> {
    let Some(shape) = TableShape::load(conn, "menus")? else {
        return Ok(Vec::new());
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT \"title\", {parent}, COUNT(*) FROM {table} WHERE {live}
         GROUP BY \"title\", {parent}
         HAVING COUNT(*) > 1
         ORDER BY \"title\"",
        parent = shape.select("parentId"),
        table = shape.table(),
        live = shape.eligible(),
    ))?;
    let mut rows = stmt.query([])?;
    let mut duplicates = Vec::new();
    while let Some(row) = rows.next()? {
        duplicates.push(DuplicateMenu {
            title: text_at(row, 0)?.unwrap_or_default(),
            parent_id: row.get(1)?,
            count: row.get(2)?,
        });
    }
    Ok(duplicates)
}

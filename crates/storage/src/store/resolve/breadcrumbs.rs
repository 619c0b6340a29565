#![forbid(unsafe_code)]

use crate::store::support::{int_at, quote_ident, table_exists, text_at};
use crate::store::types::{Breadcrumb, ContentEntity};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashSet;

// Parent chains are admin-edited; bound the walk.
const MAX_DEPTH: usize = 32;

fn home() -> Breadcrumb {
    Breadcrumb {
        title: "Home".to_string(),
        url: Some("/".to_string()),
    }
}

fn current(entity: &ContentEntity) -> Breadcrumb {
    Breadcrumb {
        title: entity.title.clone(),
        url: None,
    }
}

fn link(title: String, slug: Option<String>) -> Breadcrumb {
    Breadcrumb {
        title,
        url: slug.map(|slug| format!("/{slug}")),
    }
}

/// Ancestors of a row in a self-referencing table, root first.
fn ancestors(
    conn: &Connection,
    table: &str,
    parent_id: Option<i64>,
) -> rusqlite::Result<Vec<Breadcrumb>> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut next = parent_id;
    while let Some(id) = next {
        if chain.len() >= MAX_DEPTH || !seen.insert(id) {
            break;
        }
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT \"title\", \"slug\", \"parentId\" FROM {} WHERE \"id\" = ?1",
            quote_ident(table)
        ))?;
        let parent = stmt
            .query_row(params![id], |row| {
                Ok((
                    text_at(row, 0)?.unwrap_or_default(),
                    text_at(row, 1)?,
                    int_at(row, 2)?,
                ))
            })
            .optional()?;
        let Some((title, slug, parent_id)) = parent else {
            break;
        };
        chain.push(link(title, slug));
        next = parent_id;
    }
    chain.reverse();
    Ok(chain)
}

/// Places and articles: their own parent chain.
pub(super) fn for_tree(
    conn: &Connection,
    table: &str,
    entity: &ContentEntity,
    parent_id: Option<i64>,
) -> rusqlite::Result<Vec<Breadcrumb>> {
    let mut crumbs = vec![home()];
    crumbs.extend(ancestors(conn, table, parent_id)?);
    crumbs.push(current(entity));
    Ok(crumbs)
}

/// Packages hang under the first place they are linked to.
pub(super) fn for_package(
    conn: &Connection,
    entity: &ContentEntity,
) -> rusqlite::Result<Vec<Breadcrumb>> {
    let mut crumbs = vec![home()];
    if table_exists(conn, "package_places")? && table_exists(conn, "places")? {
        let place = conn
            .query_row(
                "SELECT p.\"title\", p.\"slug\", p.\"parentId\"
                 FROM places p
                 JOIN package_places pp ON p.\"id\" = pp.\"placeId\"
                 WHERE pp.\"packageId\" = ?1
                 ORDER BY pp.\"id\"
                 LIMIT 1",
                params![entity.id],
                |row| {
                    Ok((
                        text_at(row, 0)?.unwrap_or_default(),
                        text_at(row, 1)?,
                        int_at(row, 2)?,
                    ))
                },
            )
            .optional()?;
        if let Some((title, slug, parent_id)) = place {
            crumbs.extend(ancestors(conn, "places", parent_id)?);
            crumbs.push(link(title, slug));
        }
    }
    crumbs.push(current(entity));
    Ok(crumbs)
}

pub(super) fn for_blog(entity: &ContentEntity) -> Vec<Breadcrumb> {
    vec![
        home(),
        Breadcrumb {
            title: "Blogs".to_string(),
            url: Some("/blogs".to_string()),
        },
        current(entity),
    ]
}

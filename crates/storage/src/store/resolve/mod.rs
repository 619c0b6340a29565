#![forbid(unsafe_code)]

mod breadcrumbs;
mod entity;
mod package;
mod prerender;

use super::SqliteStore;
use super::error::ResolveError;
use super::support::{Deadline, TableShape, int_at, text_at};
use super::types::{
    ArticlePage, AuthorSummary, BlogPage, ContentEntity, PlacePage, ResolveOptions,
    ResolvedContent,
};
use entity::{EXTRA, entity_from_row, entity_query};
use rusqlite::{Connection, OptionalExtension, params};
use tm_core::{ContentKind, Slug};
use tracing::debug;

impl SqliteStore {
    /// Finds the published row owning `slug`, checking places, packages,
    /// articles and blogs in that order. The first match wins.
    ///
    /// Reserved top-level segments are filtered before this point; see
    /// [`tm_core::route_segment`].
    pub fn resolve_slug(
        &self,
        slug: &Slug,
        options: ResolveOptions,
    ) -> Result<ResolvedContent, ResolveError> {
        let deadline = Deadline::arm(&self.conn, options.timeout);
        for kind in ContentKind::ALL {
            deadline.check()?;
            if let Some(found) = resolve_kind(&self.conn, kind, slug, &deadline)? {
                debug!(slug = %slug, datatype = kind.as_str(), "slug resolved");
                return Ok(found);
            }
        }
        debug!(slug = %slug, "slug not found");
        Err(ResolveError::NotFound)
    }
}

fn resolve_kind(
    conn: &Connection,
    kind: ContentKind,
    slug: &Slug,
    deadline: &Deadline<'_>,
) -> Result<Option<ResolvedContent>, ResolveError> {
    let Some(shape) = TableShape::load(conn, kind.table())? else {
        return Ok(None);
    };
    match kind {
        ContentKind::Place => {
            let Some((entity, parent_id)) = find_with_parent(conn, &shape, slug)? else {
                return Ok(None);
            };
            deadline.check()?;
            let breadcrumbs = breadcrumbs::for_tree(conn, kind.table(), &entity, parent_id)?;
            Ok(Some(ResolvedContent::Place(PlacePage {
                entity,
                parent_id,
                breadcrumbs,
            })))
        }
        ContentKind::Article => {
            let Some((entity, parent_id)) = find_with_parent(conn, &shape, slug)? else {
                return Ok(None);
            };
            deadline.check()?;
            let breadcrumbs = breadcrumbs::for_tree(conn, kind.table(), &entity, parent_id)?;
            Ok(Some(ResolvedContent::Article(ArticlePage {
                entity,
                parent_id,
                breadcrumbs,
            })))
        }
        ContentKind::Package => package::load(conn, &shape, slug, deadline),
        ContentKind::Blog => {
            let found = conn
                .query_row(
                    &entity_query(&shape, "description", &["abstract", "publishedDate", "authorId"]),
                    params![slug.as_str()],
                    |row| {
                        Ok((
                            entity_from_row(row)?,
                            text_at(row, EXTRA)?,
                            text_at(row, EXTRA + 1)?,
                            int_at(row, EXTRA + 2)?,
                        ))
                    },
                )
                .optional()?;
            let Some((entity, abstract_text, published_date, author_id)) = found else {
                return Ok(None);
            };
            deadline.check()?;
            let author = match author_id {
                Some(author_id) => author(conn, author_id)?,
                None => None,
            };
            let breadcrumbs = breadcrumbs::for_blog(&entity);
            Ok(Some(ResolvedContent::Blog(BlogPage {
                entity,
                abstract_text,
                published_date,
                author,
                breadcrumbs,
            })))
        }
    }
}

fn find_with_parent(
    conn: &Connection,
    shape: &TableShape,
    slug: &Slug,
) -> rusqlite::Result<Option<(ContentEntity, Option<i64>)>> {
    conn.query_row(
        &entity_query(shape, "description", &["parentId"]),
        params![slug.as_str()],
        |row| Ok((entity_from_row(row)?, int_at(row, EXTRA)?)),
    )
    .optional()
}

fn author(conn: &Connection, author_id: i64) -> rusqlite::Result<Option<AuthorSummary>> {
    let Some(shape) = TableShape::load(conn, "authors")? else {
        return Ok(None);
    };
    // Authors created before the slug column fall back to their urlTitle.
    let slug = if shape.has("slug") {
        "COALESCE(\"slug\", \"urlTitle\")".to_string()
    } else {
        shape.select("urlTitle")
    };
    let deleted = if shape.has("deletedAt") {
        " AND \"deletedAt\" IS NULL"
    } else {
        ""
    };
    conn.query_row(
        &format!(
            "SELECT \"id\", \"fullName\", {slug} FROM {} WHERE \"id\" = ?1{deleted}",
            shape.table()
        ),
        params![author_id],
        |row| {
            Ok(AuthorSummary {
                id: row.get(0)?,
                full_name: text_at(row, 1)?.unwrap_or_default(),
                slug: text_at(row, 2)?.unwrap_or_default(),
            })
        },
    )
    .optional()
}

#![forbid(unsafe_code)]

mod packages;
mod site;

use super::SqliteStore;
use super::error::StoreError;
use super::support::{has_column, now_iso, quote_ident, table_exists};
use super::types::NewContent;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tm_core::{ContentKind, Slug, is_reserved, slugify};
use tracing::info;

impl SqliteStore {
    /// Inserts a row into the table behind `kind` and returns its id.
    ///
    /// The slug comes from `request.slug` or, when absent, from
    /// `slugify(url_title)`. A slug already used by any of the four content
    /// tables is rejected with [`StoreError::SlugTaken`].
    pub fn insert_content(
        &mut self,
        kind: ContentKind,
        request: NewContent,
    ) -> Result<i64, StoreError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("title must not be empty"));
        }
        let url_title = match request.url_title.trim() {
            "" => title.clone(),
            other => other.to_string(),
        };
        let slug = resolve_new_slug(request.slug.as_deref(), &url_title)?;
        if kind == ContentKind::Package && request.duration.is_none() {
            return Err(StoreError::InvalidInput("packages require a duration"));
        }

        let now = now_iso();
        let body_column = match kind {
            ContentKind::Package => "details",
            _ => "description",
        };
        let mut row: Vec<(&'static str, Value)> = vec![
            ("title", Value::from(title)),
            ("urlTitle", Value::from(url_title)),
            ("slug", Value::from(slug.as_str().to_string())),
            (body_column, Value::from(request.body)),
            ("featuredImage", Value::from(request.featured_image)),
            ("bannerImage", Value::from(request.banner_image)),
            ("metaTitle", Value::from(request.meta.title)),
            ("metaKeywords", Value::from(request.meta.keywords)),
            ("metaDescription", Value::from(request.meta.description)),
            ("status", Value::from(i64::from(request.published))),
            ("createdAt", Value::from(now.clone())),
            ("updatedAt", Value::from(now)),
        ];
        match kind {
            ContentKind::Place | ContentKind::Article => {
                row.push(("parentId", Value::from(request.parent_id)));
            }
            ContentKind::Package => {
                row.push(("duration", Value::from(request.duration)));
                row.push((
                    "durationUnit",
                    Value::from(request.duration_unit.unwrap_or_else(|| "days".to_string())),
                ));
                row.push(("defaultPrice", Value::from(request.default_price)));
                row.push(("abstract", Value::from(request.abstract_text)));
            }
            ContentKind::Blog => {
                row.push(("authorId", Value::from(request.author_id)));
                row.push(("publishedDate", Value::from(request.published_date)));
                row.push(("abstract", Value::from(request.abstract_text)));
            }
        }

        let tx = self.conn.transaction()?;
        if let Some(owner) = slug_owner_in(&tx, &slug)? {
            return Err(StoreError::SlugTaken {
                slug: slug.into_string(),
                owner,
            });
        }
        let id = insert_row(&tx, kind.table(), row)?;
        tx.commit()?;

        info!(datatype = kind.as_str(), id, slug = %slug, "content inserted");
        Ok(id)
    }

    /// Which content table already uses `slug`, counting unpublished and
    /// soft-deleted rows.
    pub fn slug_owner(&self, slug: &Slug) -> Result<Option<ContentKind>, StoreError> {
        slug_owner_in(&self.conn, slug)
    }

    /// Marks a row deleted. The row stays in place but no longer resolves.
    /// Deleting an already deleted row is a no-op.
    pub fn soft_delete(&mut self, kind: ContentKind, id: i64) -> Result<(), StoreError> {
        let table = kind.table();
        if !has_column(&self.conn, table, "deletedAt")? {
            return Err(StoreError::InvalidInput(
                "table has no deletedAt column yet; apply its schema change first",
            ));
        }
        let now = now_iso();
        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET \"deletedAt\" = ?1, \"updatedAt\" = ?1 WHERE \"id\" = ?2 AND \"deletedAt\" IS NULL",
                quote_ident(table)
            ),
            params![now, id],
        )?;
        if changed == 0 && !row_exists(&self.conn, table, id)? {
            return Err(StoreError::UnknownId);
        }
        if changed > 0 {
            info!(datatype = kind.as_str(), id, "content soft-deleted");
        }
        Ok(())
    }
}

fn resolve_new_slug(explicit: Option<&str>, url_title: &str) -> Result<Slug, StoreError> {
    let slug = match explicit {
        Some(raw) => {
            Slug::try_new(raw).map_err(|err| StoreError::InvalidInput(err.message()))?
        }
        None => slugify(url_title)
            .ok_or(StoreError::InvalidInput("urlTitle does not produce a slug"))?,
    };
    if is_reserved(slug.as_str()) {
        return Err(StoreError::InvalidInput("slug is reserved for a fixed page"));
    }
    Ok(slug)
}

fn slug_owner_in(conn: &Connection, slug: &Slug) -> Result<Option<ContentKind>, StoreError> {
    for kind in ContentKind::ALL {
        if !table_exists(conn, kind.table())? {
            continue;
        }
        let taken = conn
            .query_row(
                &format!(
                    "SELECT 1 FROM {} WHERE \"slug\" = ?1 LIMIT 1",
                    quote_ident(kind.table())
                ),
                params![slug.as_str()],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if taken {
            return Ok(Some(kind));
        }
    }
    Ok(None)
}

pub(super) fn row_exists(conn: &Connection, table: &str, id: i64) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE \"id\" = ?1", quote_ident(table)),
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

/// `INSERT` of the given column/value pairs; returns the new rowid.
pub(super) fn insert_row(
    conn: &Connection,
    table: &str,
    row: Vec<(&'static str, Value)>,
) -> Result<i64, StoreError> {
    let (columns, values): (Vec<_>, Vec<_>) = row.into_iter().unzip();
    let placeholders = (1..=columns.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    let columns = columns
        .iter()
        .map(|column| quote_ident(column))
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute(
        &format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            quote_ident(table)
        ),
        params_from_iter(values),
    )?;
    Ok(conn.last_insert_rowid())
}

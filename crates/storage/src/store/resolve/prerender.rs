#![forbid(unsafe_code)]

use crate::store::SqliteStore;
use crate::store::error::StoreError;
use crate::store::support::TableShape;
use crate::store::types::{PrerenderBatch, PrerenderFailure, ResolveOptions};
use rusqlite::params;
use tm_core::{ContentKind, RESERVED_SLUGS, Slug, is_reserved};
use tracing::{info, warn};

impl SqliteStore {
    /// Resolves up to `limit` eligible slugs in slug order for static
    /// generation. A slug that fails to resolve is recorded in
    /// [`PrerenderBatch::skipped`] and the batch carries on.
    pub fn prerender(
        &self,
        limit: usize,
        options: ResolveOptions,
    ) -> Result<PrerenderBatch, StoreError> {
        let mut batch = PrerenderBatch::default();
        for raw in self.eligible_slugs(limit)? {
            let resolved = match Slug::try_new(raw.as_str()) {
                Ok(slug) => self.resolve_slug(&slug, options),
                Err(err) => {
                    warn!(slug = %raw, error = err.message(), "skipping malformed slug");
                    batch.skipped.push(PrerenderFailure {
                        slug: raw,
                        code: "INVALID_SLUG",
                        reason: err.message().to_string(),
                    });
                    continue;
                }
            };
            match resolved {
                Ok(page) => batch.pages.push(page),
                Err(err) => {
                    warn!(slug = %raw, code = err.code(), error = %err, "skipping slug");
                    batch.skipped.push(PrerenderFailure {
                        slug: raw,
                        code: err.code(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        info!(
            pages = batch.pages.len(),
            skipped = batch.skipped.len(),
            "pre-render batch assembled"
        );
        Ok(batch)
    }

    /// Distinct eligible slugs across the four content tables, reserved
    /// segments removed.
    pub fn eligible_slugs(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut selects = Vec::with_capacity(ContentKind::ALL.len());
        for kind in ContentKind::ALL {
            let Some(shape) = TableShape::load(&self.conn, kind.table())? else {
                continue;
            };
            selects.push(format!(
                "SELECT \"slug\" AS slug FROM {} WHERE {} AND COALESCE(\"slug\", '') <> ''",
                shape.table(),
                shape.eligible()
            ));
        }
        if selects.is_empty() {
            return Ok(Vec::new());
        }

        // Reserved rows are dropped after the fetch; over-fetch so they
        // cannot eat into the limit.
        let fetch = limit.saturating_add(RESERVED_SLUGS.len());
        let sql = format!(
            "SELECT slug FROM ({}) ORDER BY slug LIMIT ?1",
            selects.join(" UNION ")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![i64::try_from(fetch).unwrap_or(i64::MAX)])?;
        let mut slugs = Vec::new();
        while let Some(row) = rows.next()? {
            let slug: String = row.get(0)?;
            if is_reserved(&slug) {
                continue;
            }
            slugs.push(slug);
            if slugs.len() == limit {
                break;
            }
        }
        Ok(slugs)
    }
}

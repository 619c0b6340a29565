#![forbid(unsafe_code)]

use super::{insert_row, row_exists};
use crate::store::SqliteStore;
use crate::store::error::StoreError;
use crate::store::support::{has_column, now_iso};
use crate::store::types::{NewAuthor, NewMenu};
use rusqlite::types::Value;
use tm_core::{Slug, slugify};

impl SqliteStore {
    pub fn insert_author(&mut self, request: NewAuthor) -> Result<i64, StoreError> {
        let full_name = request.full_name.trim().to_string();
        let email = request.email.trim().to_string();
        if full_name.is_empty() || email.is_empty() {
            return Err(StoreError::InvalidInput("authors need a full name and an email"));
        }
        let slug = match request.slug.as_deref() {
            Some(raw) => {
                Slug::try_new(raw).map_err(|err| StoreError::InvalidInput(err.message()))?
            }
            None => slugify(&full_name)
                .ok_or(StoreError::InvalidInput("full name does not produce a slug"))?,
        };

        let now = now_iso();
        let mut row: Vec<(&'static str, Value)> = vec![
            ("fullName", Value::from(full_name)),
            ("urlTitle", Value::from(slug.as_str().to_string())),
            ("email", Value::from(email)),
            ("status", Value::from(1i64)),
            ("createdAt", Value::from(now.clone())),
            ("updatedAt", Value::from(now)),
        ];
        if has_column(&self.conn, "authors", "slug")? {
            row.push(("slug", Value::from(slug.into_string())));
        }
        insert_row(&self.conn, "authors", row)
    }

    pub fn insert_menu(&mut self, request: NewMenu) -> Result<i64, StoreError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("menu title must not be empty"));
        }
        let menu_type = match request.menu_type.trim() {
            "" => "header".to_string(),
            other => other.to_string(),
        };
        if let Some(parent_id) = request.parent_id {
            if !row_exists(&self.conn, "menus", parent_id)? {
                return Err(StoreError::UnknownId);
            }
        }

        let now = now_iso();
        let row: Vec<(&'static str, Value)> = vec![
            ("title", Value::from(title)),
            ("type", Value::from(menu_type)),
            ("parentId", Value::from(request.parent_id)),
            ("urlSegmentType", Value::from(request.url_segment_type)),
            ("urlSegmentId", Value::from(request.url_segment_id)),
            ("url", Value::from(request.url)),
            ("status", Value::from(i64::from(request.active))),
            ("displayOrder", Value::from(request.display_order)),
            ("createdAt", Value::from(now.clone())),
            ("updatedAt", Value::from(now)),
        ];
        insert_row(&self.conn, "menus", row)
    }
}

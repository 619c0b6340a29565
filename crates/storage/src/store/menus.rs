#![forbid(unsafe_code)]

use super::SqliteStore;
use super::error::StoreError;
use super::support::{TableShape, int_at, text_at};
use rusqlite::{Connection, params_from_iter};
use tm_core::menu::{MenuNode, MenuTree, build_menu_tree};

const COLUMNS: [&str; 8] = [
    "id",
    "title",
    "type",
    "parentId",
    "urlSegmentType",
    "urlSegmentId",
    "url",
    "displayOrder",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum MenuFilter<'a> {
    /// Every row that is not soft-deleted.
    Live,
    /// Active, not soft-deleted rows of one menu type.
    Active(&'a str),
}

impl SqliteStore {
    /// Active menu rows of `menu_type` assembled into a forest. Rows whose
    /// parent is missing or inactive become roots.
    pub fn menu_tree(&self, menu_type: &str) -> Result<Vec<MenuTree>, StoreError> {
        let nodes = load_menu_nodes(&self.conn, MenuFilter::Active(menu_type.trim()))?;
        build_menu_tree(nodes).map_err(StoreError::Menu)
    }
}

pub(super) fn load_menu_nodes(
    conn: &Connection,
    filter: MenuFilter<'_>,
) -> Result<Vec<MenuNode>, StoreError> {
    let Some(shape) = TableShape::load(conn, "menus")? else {
        return Ok(Vec::new());
    };

    let mut clauses = Vec::new();
    let mut params = Vec::new();
    if shape.has("deletedAt") {
        clauses.push("\"deletedAt\" IS NULL".to_string());
    }
    if let MenuFilter::Active(menu_type) = filter {
        if shape.has("status") {
            clauses.push("\"status\" = 1".to_string());
        }
        if shape.has("type") {
            clauses.push(format!("\"type\" = ?{}", params.len() + 1));
            params.push(menu_type.to_string());
        }
    }
    let predicate = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT {} FROM {}{predicate} ORDER BY \"id\"",
        shape.select_list(&COLUMNS),
        shape.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(params))?;
    let mut nodes = Vec::new();
    while let Some(row) = rows.next()? {
        nodes.push(MenuNode {
            id: row.get(0)?,
            title: text_at(row, 1)?.unwrap_or_default(),
            menu_type: text_at(row, 2)?.unwrap_or_default(),
            parent_id: int_at(row, 3)?,
            url_segment_type: text_at(row, 4)?,
            url_segment_id: int_at(row, 5)?,
            url: text_at(row, 6)?,
            display_order: int_at(row, 7)?.unwrap_or_default(),
        });
    }
    Ok(nodes)
}

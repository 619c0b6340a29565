#![forbid(unsafe_code)]

use serde::Serialize;

/// One navigation row as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub menu_type: String,
    pub parent_id: Option<i64>,
    pub url_segment_type: Option<String>,
    pub url_segment_id: Option<i64>,
    pub url: Option<String>,
    pub display_order: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuTree {
    #[serde(flatten)]
    pub node: MenuNode,
    pub children: Vec<MenuTree>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuTreeError {
    DuplicateId { id: i64 },
    Cycle { id: i64 },
}

impl MenuTreeError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "menu id appears more than once",
            Self::Cycle { .. } => "menu parent chain forms a cycle",
        }
    }
}

#![forbid(unsafe_code)]

use serde::Serialize;
use tm_core::ContentKind;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRef {
    pub id: i64,
    pub title: String,
    pub parent_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenMenuLink {
    pub id: i64,
    pub title: String,
    pub url_segment_type: String,
    pub url_segment_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    pub slug: String,
    pub owners: Vec<ContentKind>,
}

/// Active, non-deleted menus sharing a title under the same parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMenu {
    pub title: String,
    pub parent_id: Option<i64>,
    pub count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub orphaned_menus: Vec<MenuRef>,
    pub cyclic_menus: Vec<i64>,
    pub broken_menu_links: Vec<BrokenMenuLink>,
    pub slug_collisions: Vec<SlugCollision>,
    pub duplicate_menus: Vec<DuplicateMenu>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.orphaned_menus.is_empty()
            && self.cyclic_menus.is_empty()
            && self.broken_menu_links.is_empty()
            && self.slug_collisions.is_empty()
            && self.duplicate_menus.is_empty()
    }
}

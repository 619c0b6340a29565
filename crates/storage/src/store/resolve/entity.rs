#![forbid(unsafe_code)]

use crate::store::support::{TableShape, text_at};
use crate::store::types::{ContentEntity, ImageRef, Meta};

const HEAD: [&str; 4] = ["id", "title", "urlTitle", "slug"];
const TAIL: [&str; 9] = [
    "featuredImage",
    "featuredImageAlt",
    "bannerImage",
    "bannerImageAlt",
    "metaTitle",
    "metaKeywords",
    "metaDescription",
    "createdAt",
    "updatedAt",
];

/// Index of the first kind-specific column in rows from [`entity_query`].
pub(super) const EXTRA: usize = HEAD.len() + 1 + TAIL.len();

/// Eligible row with the given slug (`?1`): the shared entity columns,
/// `body` as column 4, then `extras` from [`EXTRA`] on.
pub(super) fn entity_query(shape: &TableShape, body: &str, extras: &[&str]) -> String {
    let mut columns = Vec::with_capacity(EXTRA + extras.len());
    columns.extend(HEAD.iter().map(|column| shape.select(column)));
    columns.push(shape.select(body));
    columns.extend(TAIL.iter().map(|column| shape.select(column)));
    columns.extend(extras.iter().map(|column| shape.select(column)));
    format!(
        "SELECT {} FROM {} WHERE \"slug\" = ?1 AND {} ORDER BY \"id\" LIMIT 1",
        columns.join(", "),
        shape.table(),
        shape.eligible()
    )
}

pub(super) fn entity_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentEntity> {
    Ok(ContentEntity {
        id: row.get(0)?,
        title: text_at(row, 1)?.unwrap_or_default(),
        url_title: text_at(row, 2)?.unwrap_or_default(),
        slug: text_at(row, 3)?.unwrap_or_default(),
        body: text_at(row, 4)?,
        featured_image: ImageRef::from_columns(text_at(row, 5)?, text_at(row, 6)?),
        banner_image: ImageRef::from_columns(text_at(row, 7)?, text_at(row, 8)?),
        meta: Meta {
            title: text_at(row, 9)?,
            keywords: text_at(row, 10)?,
            description: text_at(row, 11)?,
        },
        created_at: text_at(row, 12)?,
        updated_at: text_at(row, 13)?,
    })
}

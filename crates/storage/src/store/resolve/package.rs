#![forbid(unsafe_code)]

use super::breadcrumbs;
use super::entity::{EXTRA, entity_from_row, entity_query};
use crate::store::error::ResolveError;
use crate::store::support::{Deadline, TableShape, int_at, real_at, text_at};
use crate::store::types::{ImageRef, ItineraryDay, PackagePage, ResolvedContent, TestimonialSummary};
use rusqlite::{Connection, OptionalExtension, params};
use tm_core::Slug;
use tracing::warn;

const EXTRAS: [&str; 9] = [
    "duration",
    "durationUnit",
    "defaultPrice",
    "abstract",
    "groupSize",
    "maxAltitude",
    "tripHighlights",
    "costInclude",
    "costExclude",
];

const ITINERARY: [&str; 12] = [
    "dayNumber",
    "title",
    "description",
    "meals",
    "accommodation",
    "walkingHours",
    "distance",
    "origin",
    "destination",
    "originElevation",
    "destinationElevation",
    "transportation",
];

const TESTIMONIAL: [&str; 10] = [
    "id",
    "reviewTitle",
    "slug",
    "fullName",
    "address",
    "rating",
    "date",
    "description",
    "avatar",
    "avatarAlt",
];

/// Package row plus its itinerary, eligible testimonials and breadcrumbs.
pub(super) fn load(
    conn: &Connection,
    shape: &TableShape,
    slug: &Slug,
    deadline: &Deadline<'_>,
) -> Result<Option<ResolvedContent>, ResolveError> {
    let found = conn
        .query_row(
            &entity_query(shape, "details", &EXTRAS),
            params![slug.as_str()],
            |row| {
                Ok(PackagePage {
                    entity: entity_from_row(row)?,
                    duration: int_at(row, EXTRA)?,
                    duration_unit: text_at(row, EXTRA + 1)?,
                    default_price: real_at(row, EXTRA + 2)?,
                    abstract_text: text_at(row, EXTRA + 3)?,
                    group_size: text_at(row, EXTRA + 4)?,
                    max_altitude: text_at(row, EXTRA + 5)?,
                    trip_highlights: text_at(row, EXTRA + 6)?,
                    cost_include: text_at(row, EXTRA + 7)?,
                    cost_exclude: text_at(row, EXTRA + 8)?,
                    itinerary: Vec::new(),
                    testimonials: Vec::new(),
                    breadcrumbs: Vec::new(),
                })
            },
        )
        .optional()?;
    let Some(mut page) = found else {
        return Ok(None);
    };

    deadline.check()?;
    page.itinerary = itinerary(conn, page.entity.id)?;
    deadline.check()?;
    page.testimonials = testimonials(conn, page.entity.id)?;
    deadline.check()?;
    page.breadcrumbs = breadcrumbs::for_package(conn, &page.entity)?;
    Ok(Some(ResolvedContent::Package(page)))
}

/// Days ascending by `dayNumber`. Route columns missing on older stores
/// come back empty.
fn itinerary(conn: &Connection, package_id: i64) -> rusqlite::Result<Vec<ItineraryDay>> {
    let Some(shape) = TableShape::load(conn, "package_itinerary")? else {
        return Ok(Vec::new());
    };
    let sql = format!(
        "SELECT {} FROM {} WHERE \"packageId\" = ?1 ORDER BY \"dayNumber\" ASC, \"id\" ASC",
        shape.select_list(&ITINERARY),
        shape.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![package_id])?;
    let mut days = Vec::new();
    while let Some(row) = rows.next()? {
        days.push(ItineraryDay {
            day_number: int_at(row, 0)?.unwrap_or_default(),
            title: text_at(row, 1)?.unwrap_or_default(),
            description: text_at(row, 2)?,
            meals: text_at(row, 3)?,
            accommodation: text_at(row, 4)?,
            walking_hours: text_at(row, 5)?,
            distance: text_at(row, 6)?,
            origin: text_at(row, 7)?,
            destination: text_at(row, 8)?,
            origin_elevation: text_at(row, 9)?,
            destination_elevation: text_at(row, 10)?,
            transportation: text_at(row, 11)?,
        });
    }
    Ok(days)
}

/// Published testimonials linked through `package_testimonials`, newest
/// first.
fn testimonials(conn: &Connection, package_id: i64) -> rusqlite::Result<Vec<TestimonialSummary>> {
    let Some(links) = TableShape::load(conn, "package_testimonials")? else {
        warn!(package_id, "package_testimonials table missing; serving no testimonials");
        return Ok(Vec::new());
    };
    let Some(shape) = TableShape::load(conn, "testimonials")? else {
        warn!(package_id, "testimonials table missing; serving no testimonials");
        return Ok(Vec::new());
    };

    let columns = TESTIMONIAL.map(|column| shape.select_in("t", column));
    let sql = format!(
        "SELECT {} FROM {} t JOIN {} pt ON pt.\"testimonialId\" = t.\"id\"
         WHERE pt.\"packageId\" = ?1 AND {}
         ORDER BY t.\"date\" DESC, t.\"id\" ASC",
        columns.join(", "),
        shape.table(),
        links.table(),
        shape.eligible_in("t")
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![package_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(TestimonialSummary {
            id: row.get(0)?,
            review_title: text_at(row, 1)?.unwrap_or_default(),
            slug: text_at(row, 2)?.unwrap_or_default(),
            full_name: text_at(row, 3)?.unwrap_or_default(),
            address: text_at(row, 4)?,
            rating: int_at(row, 5)?,
            date: text_at(row, 6)?.unwrap_or_default(),
            description: text_at(row, 7)?,
            avatar: ImageRef::from_columns(text_at(row, 8)?, text_at(row, 9)?),
        });
    }
    Ok(out)
}

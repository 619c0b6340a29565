#![forbid(unsafe_code)]

use super::{insert_row, row_exists};
use crate::store::SqliteStore;
use crate::store::error::{StoreError, is_constraint_violation};
use crate::store::support::{column_names, now_iso};
use crate::store::types::{NewItineraryDay, NewTestimonial};
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, params};
use tm_core::{Slug, slugify};

impl SqliteStore {
    /// Adds one itinerary day. Day numbers start at 1 and are unique per
    /// package.
    pub fn add_itinerary_day(
        &mut self,
        package_id: i64,
        day: NewItineraryDay,
    ) -> Result<i64, StoreError> {
        if day.day_number < 1 {
            return Err(StoreError::InvalidInput("dayNumber must be at least 1"));
        }
        if day.title.trim().is_empty() {
            return Err(StoreError::InvalidInput("itinerary title must not be empty"));
        }

        let tx = self.conn.transaction()?;
        if !row_exists(&tx, "packages", package_id)? {
            return Err(StoreError::UnknownId);
        }
        let taken = tx
            .query_row(
                "SELECT 1 FROM package_itinerary WHERE \"packageId\" = ?1 AND \"dayNumber\" = ?2",
                params![package_id, day.day_number],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if taken {
            return Err(StoreError::DuplicateDay {
                package_id,
                day_number: day.day_number,
            });
        }

        let mut row: Vec<(&'static str, Value)> = vec![
            ("packageId", Value::from(package_id)),
            ("dayNumber", Value::from(day.day_number)),
            ("title", Value::from(day.title.trim().to_string())),
            ("description", Value::from(day.description)),
            ("meals", Value::from(day.meals)),
            ("accommodation", Value::from(day.accommodation)),
            ("walkingHours", Value::from(day.walking_hours)),
        ];
        // Route details need the columns added by `itinerary_route_fields`.
        let present = column_names(&tx, "package_itinerary")?;
        for (column, value) in [
            ("distance", day.distance),
            ("origin", day.origin),
            ("destination", day.destination),
            ("originElevation", day.origin_elevation),
            ("destinationElevation", day.destination_elevation),
            ("transportation", day.transportation),
        ] {
            if value.is_none() {
                continue;
            }
            if !present.iter().any(|name| name == column) {
                return Err(StoreError::InvalidInput(
                    "this store has no itinerary route columns",
                ));
            }
            row.push((column, Value::from(value)));
        }

        let id = insert_row(&tx, "package_itinerary", row).map_err(|err| match err {
            StoreError::Sql(sql) if is_constraint_violation(&sql) => StoreError::DuplicateDay {
                package_id,
                day_number: day.day_number,
            },
            other => other,
        })?;
        tx.commit()?;
        Ok(id)
    }

    pub fn insert_testimonial(&mut self, request: NewTestimonial) -> Result<i64, StoreError> {
        let review_title = request.review_title.trim().to_string();
        if review_title.is_empty() || request.full_name.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "testimonials need a review title and a full name",
            ));
        }
        if request.date.trim().is_empty() {
            return Err(StoreError::InvalidInput("testimonial date must not be empty"));
        }
        let slug = match request.slug.as_deref() {
            Some(raw) => {
                Slug::try_new(raw).map_err(|err| StoreError::InvalidInput(err.message()))?
            }
            None => slugify(&review_title)
                .ok_or(StoreError::InvalidInput("review title does not produce a slug"))?,
        };

        let now = now_iso();
        let row: Vec<(&'static str, Value)> = vec![
            ("reviewTitle", Value::from(review_title.clone())),
            ("urlTitle", Value::from(review_title)),
            ("slug", Value::from(slug.into_string())),
            ("fullName", Value::from(request.full_name.trim().to_string())),
            ("address", Value::from(request.address)),
            ("rating", Value::from(request.rating)),
            ("date", Value::from(request.date)),
            ("description", Value::from(request.description)),
            ("status", Value::from(i64::from(request.published))),
            ("createdAt", Value::from(now.clone())),
            ("updatedAt", Value::from(now)),
        ];
        insert_row(&self.conn, "testimonials", row).map_err(|err| match err {
            StoreError::Sql(sql) if is_constraint_violation(&sql) => {
                StoreError::InvalidInput("testimonial slug is already used")
            }
            other => other,
        })
    }

    /// Links a testimonial to a package. Returns `false` when the link
    /// already existed.
    pub fn link_testimonial(
        &mut self,
        package_id: i64,
        testimonial_id: i64,
    ) -> Result<bool, StoreError> {
        if !row_exists(&self.conn, "packages", package_id)?
            || !row_exists(&self.conn, "testimonials", testimonial_id)?
        {
            return Err(StoreError::UnknownId);
        }
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO package_testimonials (\"packageId\", \"testimonialId\") VALUES (?1, ?2)",
            params![package_id, testimonial_id],
        )?;
        Ok(inserted > 0)
    }

    /// Links a package to a place; the first link drives package breadcrumbs.
    pub fn link_place(&mut self, package_id: i64, place_id: i64) -> Result<bool, StoreError> {
        if !row_exists(&self.conn, "packages", package_id)?
            || !row_exists(&self.conn, "places", place_id)?
        {
            return Err(StoreError::UnknownId);
        }
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO package_places (\"packageId\", \"placeId\") VALUES (?1, ?2)",
            params![package_id, place_id],
        )?;
        Ok(inserted > 0)
    }
}

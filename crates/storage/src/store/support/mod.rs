#![forbid(unsafe_code)]

mod deadline;
mod introspect;
mod shape;
mod snapshot;
mod time;

pub(in crate::store) use deadline::Deadline;
pub(in crate::store) use introspect::*;
pub(in crate::store) use shape::{TableShape, int_at, real_at, text_at};
pub(in crate::store) use snapshot::rows_as_json;
pub(in crate::store) use time::now_iso;

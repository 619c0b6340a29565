#![forbid(unsafe_code)]

mod content;
mod integrity;
mod requests;
mod schema;

pub use content::*;
pub use integrity::*;
pub use requests::*;
pub use schema::*;

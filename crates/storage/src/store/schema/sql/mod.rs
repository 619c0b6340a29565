#![forbid(unsafe_code)]

mod content;
mod packages;
mod site;

pub(super) use content::*;
pub(super) use packages::*;
pub(super) use site::*;

/// Instantiates a DDL template for `table`.
pub(super) fn render(ddl: &str, table: &str) -> String {
    ddl.replace("{table}", table)
}

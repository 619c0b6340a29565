#![forbid(unsafe_code)]

use thiserror::Error;
use tm_core::ContentKind;
use tm_core::menu::MenuTreeError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("unknown id")]
    UnknownId,
    #[error("slug `{slug}` is already used by a {owner}")]
    SlugTaken { slug: String, owner: ContentKind },
    #[error("package {package_id} already has itinerary day {day_number}")]
    DuplicateDay { package_id: i64, day_number: i64 },
    #[error("menu tree: {} ({})", .0.message(), menu_error_id(.0))]
    Menu(MenuTreeError),
}

fn menu_error_id(err: &MenuTreeError) -> i64 {
    match err {
        MenuTreeError::DuplicateId { id } | MenuTreeError::Cycle { id } => *id,
    }
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::Sql(_) => "STORE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::UnknownId => "UNKNOWN_ID",
            Self::SlugTaken { .. } => "SLUG_TAKEN",
            Self::DuplicateDay { .. } => "DUPLICATE_DAY",
            Self::Menu(_) => "MENU_TREE",
        }
    }
}

/// Failure of one schema change. Every variant is fatal for the run that
/// produced it.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("unknown schema change `{0}`")]
    UnknownChange(String),
    #[error("schema change `{change}` failed: {source}")]
    Schema {
        change: &'static str,
        source: rusqlite::Error,
    },
    #[error(
        "schema change `{change}` found intermediate table `{table}` left by an interrupted rebuild; inspect it manually"
    )]
    IntermediateState { change: &'static str, table: String },
    #[error("schema change `{change}` copied {after} of {before} rows")]
    RowCountMismatch {
        change: &'static str,
        before: i64,
        after: i64,
    },
    #[error("schema change `{change}` left {violations} foreign key violation(s)")]
    ForeignKeyViolation {
        change: &'static str,
        violations: usize,
    },
    #[error("schema change `{change}` requires {missing:?} to be applied first")]
    Dependency {
        change: &'static str,
        missing: Vec<&'static str>,
    },
}

impl MigrationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownChange(_) => "UNKNOWN_CHANGE",
            Self::Dependency { .. } => "DEPENDENCY_ERROR",
            Self::Schema { .. }
            | Self::IntermediateState { .. }
            | Self::RowCountMismatch { .. }
            | Self::ForeignKeyViolation { .. } => "SCHEMA_ERROR",
        }
    }

    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Dependency { .. })
    }

    pub(crate) fn schema(change: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Schema { change, source }
    }
}

/// Slug resolution failure. Callers degrade every variant to a not-found
/// page; only `Store` also indicates something operators must look at.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no published content matches the slug")]
    NotFound,
    #[error("slug resolution exceeded its deadline")]
    Timeout,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Timeout => "TIMEOUT",
            Self::Store(err) => err.code(),
        }
    }

    /// `false` only for store failures, which deserve an error log.
    pub fn is_not_found_like(&self) -> bool {
        matches!(self, Self::NotFound | Self::Timeout)
    }
}

impl From<rusqlite::Error> for ResolveError {
    fn from(value: rusqlite::Error) -> Self {
        if is_interrupted(&value) {
            Self::Timeout
        } else {
            Self::Store(StoreError::Sql(value))
        }
    }
}

pub(crate) fn is_interrupted(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::OperationInterrupted
    )
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    AddColumn,
    CreateTable,
    RenameTable,
    Backfill,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::AddColumn => "add_column",
            ChangeKind::CreateTable => "create_table",
            ChangeKind::RenameTable => "rename_table",
            ChangeKind::Backfill => "backfill",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub decl: &'static str,
}

/// Value for a column the old table does not have, as an SQL expression over
/// the old row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnFill {
    pub column: &'static str,
    pub expr: &'static str,
}

/// DDL templates use `{table}` in place of the table name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeStep {
    AddColumns {
        columns: &'static [ColumnDef],
    },
    CreateTable {
        ddl: &'static str,
    },
    RebuildTable {
        ddl: &'static str,
        fills: &'static [ColumnFill],
    },
    Backfill {
        pending_sql: &'static str,
        apply_sql: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaChange {
    pub name: &'static str,
    pub table: &'static str,
    pub summary: &'static str,
    pub depends_on: &'static [&'static str],
    pub step: ChangeStep,
}

impl SchemaChange {
    pub fn kind(&self) -> ChangeKind {
        match self.step {
            ChangeStep::AddColumns { .. } => ChangeKind::AddColumn,
            ChangeStep::CreateTable { .. } => ChangeKind::CreateTable,
            ChangeStep::RebuildTable { .. } => ChangeKind::RenameTable,
            ChangeStep::Backfill { .. } => ChangeKind::Backfill,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOutcome {
    Applied,
    AlreadyApplied,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    pub name: &'static str,
    pub kind: ChangeKind,
    pub table: &'static str,
    pub outcome: ChangeOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_before: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<usize>,
}

impl ChangeReport {
    pub(crate) fn new(change: &SchemaChange, outcome: ChangeOutcome) -> Self {
        Self {
            name: change.name,
            kind: change.kind(),
            table: change.table,
            outcome,
            rows_before: None,
            rows_after: None,
            rows_affected: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangeStatus {
    pub name: &'static str,
    pub kind: ChangeKind,
    pub table: &'static str,
    pub applied: bool,
    pub depends_on: &'static [&'static str],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

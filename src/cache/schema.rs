//! SQLite schema definitions for the cache database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const CACHE_ENTRIES_TABLE: Table = Table {
    name: "cache_entries",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("value", &SqlType::Text, non_null = true),
        // Unix millis; NULL never expires
        sqlite_column!("expires_at", &SqlType::Integer),
        sqlite_column!("updated_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_cache_entries_expires_at", "expires_at")],
};

pub const CACHE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[CACHE_ENTRIES_TABLE],
}];

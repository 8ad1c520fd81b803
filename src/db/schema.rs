//! Database schema and migrations for filecat.
//!
//! Migrations are applied in order when the database is first opened or
//! upgraded; the schema_version table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Catalog nodes
    r#"
-- Files and folders (metadata only).
-- parent_id has no foreign key: dangling references are representable.
-- name_folded and sort_key are derived from name when it is written;
-- searching and ordering use them so non-ASCII names fold and sort properly.
CREATE TABLE nodes (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    sort_key    TEXT NOT NULL,
    type        TEXT NOT NULL CHECK (type IN ('FILE', 'FOLDER')),
    parent_id   TEXT,
    size        INTEGER,
    mime_type   TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX idx_nodes_parent_id ON nodes(parent_id);
CREATE INDEX idx_nodes_type ON nodes(type);
CREATE INDEX idx_nodes_sort_key ON nodes(sort_key, name_folded);
"#,
];

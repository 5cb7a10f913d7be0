//! SQLite Resource Store
//!
//! File-based persistent storage using SQLite.
//!
//! Filters and the rating ordering are pushed into SQL. Versions are
//! ordered in Rust with the version ordering rule, since SQLite has no
//! integer-array cast to order `"1.10"` after `"1.9"`.

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{
    Catalog, FetchSpec, Filter, OrderBy, Resource, ResourceId, ResourceRow, ResourceStore,
    ResourceVersion, Tag, Target, VersionPreload,
};
use crate::version::sort_versions;
use crate::{Result, StorageError};

/// Catalog schema (tables are created if missing, never altered)
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS catalogs (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS resources (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    rating REAL NOT NULL DEFAULT 0,
    catalog_id INTEGER NOT NULL,
    FOREIGN KEY (catalog_id) REFERENCES catalogs(id)
);

CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS resource_tags (
    resource_id INTEGER NOT NULL,
    tag_id INTEGER NOT NULL,
    PRIMARY KEY (resource_id, tag_id),
    FOREIGN KEY (resource_id) REFERENCES resources(id),
    FOREIGN KEY (tag_id) REFERENCES tags(id)
);

CREATE TABLE IF NOT EXISTS resource_versions (
    id INTEGER PRIMARY KEY,
    resource_id INTEGER NOT NULL,
    version TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    display_name TEXT NOT NULL DEFAULT '',
    min_pipelines_version TEXT NOT NULL DEFAULT '',
    url TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (resource_id) REFERENCES resources(id)
);

CREATE INDEX IF NOT EXISTS idx_resources_type ON resources(type);
CREATE INDEX IF NOT EXISTS idx_resource_versions_resource ON resource_versions(resource_id, version);
";

const RESOURCE_COLUMNS: &str =
    "r.id, r.name, r.type, r.rating, r.catalog_id, c.id, c.name, c.type";

/// Resource ids bound per preload statement, well under SQLite's
/// host-parameter limit (999 before 3.32)
const PRELOAD_BATCH: usize = 500;

const VERSION_COLUMNS: &str =
    "id, resource_id, version, description, display_name, min_pipelines_version, url, updated_at";

/// SQLite-based ResourceStore implementation
#[derive(Clone)]
pub struct SqliteResourceStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteResourceStore {
    /// Open (or create) a SQLite store at the given path
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StorageError::config("database path is empty"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Self::from_connection(Connection::open(path)?)
    }

    /// Create an in-memory SQLite store (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn query_resources(&self, spec: &FetchSpec) -> Result<Vec<ResourceRow>> {
        spec.check_target(Target::Resources)?;

        let mut params = Vec::new();
        let mut sql = format!(
            "SELECT {} FROM resources r JOIN catalogs c ON c.id = r.catalog_id",
            RESOURCE_COLUMNS
        );
        sql.push_str(&where_clause(&spec.filters, Target::Resources, &mut params));
        sql.push_str(&order_clause(&spec.order));
        if let Some(limit) = spec.limit {
            sql.push_str(" LIMIT ?");
            params.push(Value::Integer(limit as i64));
        }

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt
            .query_map(params_from_iter(params.iter()), resource_row_from_sql)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if rows.is_empty() {
            return Ok(rows);
        }
        let ids: Vec<ResourceId> = rows.iter().map(|r| r.resource.id).collect();

        if spec.preload.tags {
            let mut tags = load_tags(&conn, &ids)?;
            for row in &mut rows {
                row.tags = tags.remove(&row.resource.id).unwrap_or_default();
            }
        }

        if let Some(preload) = &spec.preload.versions {
            let mut versions = load_versions(&conn, &ids, preload)?;
            for row in &mut rows {
                let mut loaded = versions.remove(&row.resource.id).unwrap_or_default();
                sort_versions(&mut loaded)?;
                row.versions = loaded;
            }
        }

        Ok(rows)
    }

    fn query_versions(&self, spec: &FetchSpec) -> Result<Vec<ResourceVersion>> {
        spec.check_target(Target::Versions)?;

        let mut params = Vec::new();
        let mut sql = format!("SELECT {} FROM resource_versions", VERSION_COLUMNS);
        sql.push_str(&where_clause(&spec.filters, Target::Versions, &mut params));
        sql.push_str(" ORDER BY id");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let mut versions = stmt
            .query_map(params_from_iter(params.iter()), version_from_sql)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if spec.order.contains(&OrderBy::VersionAsc) {
            sort_versions(&mut versions)?;
        }
        // Applied here rather than in SQL so it follows the version ordering
        if let Some(limit) = spec.limit {
            versions.truncate(limit);
        }
        Ok(versions)
    }
}

#[async_trait]
impl ResourceStore for SqliteResourceStore {
    async fn fetch_resources(&self, spec: &FetchSpec) -> Result<Vec<ResourceRow>> {
        self.query_resources(spec)
    }

    async fn first_resource(&self, spec: &FetchSpec) -> Result<ResourceRow> {
        self.query_resources(&spec.clone().limit(1))?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::record_not_found("resource"))
    }

    async fn fetch_versions(&self, spec: &FetchSpec) -> Result<Vec<ResourceVersion>> {
        self.query_versions(spec)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SQL building
// ═══════════════════════════════════════════════════════════════════════════

fn where_clause(filters: &[Filter], target: Target, params: &mut Vec<Value>) -> String {
    let prefix = match target {
        Target::Resources => "r.",
        Target::Versions => "",
    };

    let conditions: Vec<String> = filters
        .iter()
        .map(|filter| match filter {
            Filter::TypeEquals(kind) => {
                params.push(Value::Text(kind.clone()));
                format!("LOWER({}type) = ?", prefix)
            }
            Filter::NameEquals(name) => {
                params.push(Value::Text(name.clone()));
                format!("LOWER({}name) = ?", prefix)
            }
            Filter::NameContains(name) => {
                params.push(Value::Text(format!("%{}%", name)));
                format!("LOWER({}name) LIKE ?", prefix)
            }
            Filter::ResourceId(id) => {
                params.push(Value::Integer(i64::from(*id)));
                match target {
                    Target::Resources => "r.id = ?".to_string(),
                    Target::Versions => "resource_id = ?".to_string(),
                }
            }
            Filter::HasVersions => {
                "EXISTS (SELECT 1 FROM resource_versions v WHERE v.resource_id = r.id)".to_string()
            }
        })
        .collect();

    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn order_clause(order: &[OrderBy]) -> String {
    let terms: Vec<&str> = order
        .iter()
        .filter_map(|o| match o {
            OrderBy::RatingDescNameAsc => Some("r.rating DESC, r.name ASC"),
            // Applied after loading
            OrderBy::VersionAsc => None,
        })
        .collect();

    if terms.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", terms.join(", "))
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn id_params(ids: &[ResourceId]) -> Vec<Value> {
    ids.iter().map(|id| Value::Integer(i64::from(*id))).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Preloading
// ═══════════════════════════════════════════════════════════════════════════

fn load_tags(conn: &Connection, ids: &[ResourceId]) -> Result<HashMap<ResourceId, Vec<Tag>>> {
    let mut grouped: HashMap<ResourceId, Vec<Tag>> = HashMap::new();

    for batch in ids.chunks(PRELOAD_BATCH) {
        let sql = format!(
            "SELECT rt.resource_id, t.id, t.name
             FROM tags t JOIN resource_tags rt ON rt.tag_id = t.id
             WHERE rt.resource_id IN ({})
             ORDER BY t.name ASC",
            placeholders(batch.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let pairs = stmt
            .query_map(params_from_iter(id_params(batch)), |row| {
                Ok((
                    row.get::<_, ResourceId>(0)?,
                    Tag {
                        id: row.get(1)?,
                        name: row.get(2)?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // A resource lives in exactly one batch, so its tags stay name-ordered
        for (resource_id, tag) in pairs {
            grouped.entry(resource_id).or_default().push(tag);
        }
    }
    Ok(grouped)
}

fn load_versions(
    conn: &Connection,
    ids: &[ResourceId],
    preload: &VersionPreload,
) -> Result<HashMap<ResourceId, Vec<ResourceVersion>>> {
    let mut grouped: HashMap<ResourceId, Vec<ResourceVersion>> = HashMap::new();

    for batch in ids.chunks(PRELOAD_BATCH) {
        let mut params = id_params(batch);
        let mut sql = format!(
            "SELECT {} FROM resource_versions WHERE resource_id IN ({})",
            VERSION_COLUMNS,
            placeholders(batch.len())
        );
        if let Some(version) = &preload.exact {
            sql.push_str(" AND version = ?");
            params.push(Value::Text(version.clone()));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let versions = stmt
            .query_map(params_from_iter(params), version_from_sql)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for version in versions {
            grouped.entry(version.resource_id).or_default().push(version);
        }
    }
    Ok(grouped)
}

// ═══════════════════════════════════════════════════════════════════════════
// Row mapping
// ═══════════════════════════════════════════════════════════════════════════

fn resource_row_from_sql(row: &Row<'_>) -> rusqlite::Result<ResourceRow> {
    Ok(ResourceRow::new(
        Resource {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: row.get(2)?,
            rating: row.get(3)?,
            catalog_id: row.get(4)?,
        },
        Catalog {
            id: row.get(5)?,
            name: row.get(6)?,
            kind: row.get(7)?,
        },
    ))
}

fn version_from_sql(row: &Row<'_>) -> rusqlite::Result<ResourceVersion> {
    Ok(ResourceVersion {
        id: row.get(0)?,
        resource_id: row.get(1)?,
        version: row.get(2)?,
        description: row.get(3)?,
        display_name: row.get(4)?,
        min_pipelines_version: row.get(5)?,
        url: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

//! Shared fixtures for service tests
//!
//! One small catalog, loadable into either store:
//!
//! | id | name    | type     | rating | versions        | tags                 |
//! |----|---------|----------|--------|-----------------|----------------------|
//! | 1  | foobar  | Task     | 4.0    | 0.1, 0.2        | cli                  |
//! | 2  | barbaz  | task     | 3.5    | 1.10, 1.2, 1.0  | image-build, build   |
//! | 3  | Buildah | pipeline | 4.5    | 0.1             |                      |
//! | 4  | orphan  | task     | 5.0    |                 |                      |
//! | 5  | dupe    | task     | 2.0    | 0.2, 0.2        |                      |
//!
//! `rows_with_malformed_version` adds resource 6 with versions 1.0 and 1.x.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use hub_storage::{Catalog, InMemoryResourceStore, Resource, ResourceRow, ResourceVersion, Tag};
use hub_query::{QueryConfig, ResourceService};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub fn updated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 8, 5, 10, 11, 12).unwrap()
}

pub fn web_url(name: &str, version: &str) -> String {
    format!(
        "https://github.com/tektoncd/catalog/tree/main/task/{}/{}",
        name, version
    )
}

fn row(
    id: u32,
    name: &str,
    kind: &str,
    rating: f64,
    versions: &[(u32, &str, &str)],
    tags: &[(u32, &str)],
) -> ResourceRow {
    let mut row = ResourceRow::new(
        Resource::new(id, name, kind, rating, 1),
        Catalog::new(1, "tekton", "official"),
    );
    row.versions = versions
        .iter()
        .map(|(vid, version, description)| {
            ResourceVersion::new(*vid, id, *version, web_url(name, version), updated_at())
                .with_details(*description, name, "0.12.1")
        })
        .collect();
    row.tags = tags.iter().map(|(tid, tag)| Tag::new(*tid, *tag)).collect();
    row
}

/// Catalog rows; versions appear in insertion order, not version order
pub fn catalog_rows() -> Vec<ResourceRow> {
    vec![
        row(
            1,
            "foobar",
            "Task",
            4.0,
            &[(10, "0.1", "foo one"), (11, "0.2", "foo two")],
            &[(1, "cli")],
        ),
        row(
            2,
            "barbaz",
            "task",
            3.5,
            &[(20, "1.10", "ten"), (21, "1.2", "two"), (22, "1.0", "zero")],
            &[(2, "image-build"), (3, "build")],
        ),
        row(3, "Buildah", "pipeline", 4.5, &[(30, "0.1", "buildah")], &[]),
        row(4, "orphan", "task", 5.0, &[], &[]),
        row(
            5,
            "dupe",
            "task",
            2.0,
            &[(50, "0.2", "first"), (51, "0.2", "second")],
            &[],
        ),
    ]
}

/// Catalog rows plus resource 6, "broken", whose versions cannot be ordered
pub fn rows_with_malformed_version() -> Vec<ResourceRow> {
    let mut rows = catalog_rows();
    rows.push(row(
        6,
        "broken",
        "task",
        1.0,
        &[(60, "1.0", "fine"), (61, "1.x", "bad")],
        &[],
    ));
    rows
}

pub fn memory_service() -> ResourceService {
    ResourceService::new(
        InMemoryResourceStore::with_rows(catalog_rows()),
        QueryConfig::default(),
    )
}

/// Helper: Write the catalog rows into a SQLite database at `path`
#[cfg(feature = "sqlite")]
pub fn seed_sqlite(path: &std::path::Path) {
    seed_sqlite_with(path, catalog_rows());
}

#[cfg(feature = "sqlite")]
pub fn seed_sqlite_with(path: &std::path::Path, rows: Vec<ResourceRow>) {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.execute_batch(hub_storage::SCHEMA).unwrap();

    for row in rows {
        conn.execute(
            "INSERT OR IGNORE INTO catalogs (id, name, type) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.catalog.id, row.catalog.name, row.catalog.kind],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO resources (id, name, type, rating, catalog_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.resource.id,
                row.resource.name,
                row.resource.kind,
                row.resource.rating,
                row.resource.catalog_id
            ],
        )
        .unwrap();
        for tag in &row.tags {
            conn.execute(
                "INSERT OR IGNORE INTO tags (id, name) VALUES (?1, ?2)",
                rusqlite::params![tag.id, tag.name],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO resource_tags (resource_id, tag_id) VALUES (?1, ?2)",
                rusqlite::params![row.resource.id, tag.id],
            )
            .unwrap();
        }
        for v in &row.versions {
            conn.execute(
                "INSERT INTO resource_versions
                 (id, resource_id, version, description, display_name, min_pipelines_version, url, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    v.id,
                    v.resource_id,
                    v.version,
                    v.description,
                    v.display_name,
                    v.min_pipelines_version,
                    v.url,
                    v.updated_at
                ],
            )
            .unwrap();
        }
    }
}

/// In-memory log sink for asserting on emitted events
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route events on the current thread into a capture until the guard drops
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

//! Task repository contract and SQLite implementation.
//!
//! The local table is the single source of truth while offline. It only
//! knows full-record upserts keyed by `id`; there is no partial update and
//! no delete path.
//!
//! # Invariants
//! - `put` overwrites any existing record with the same id in full.
//! - `get_all` enumeration order is unspecified; display reads go through
//!   `list_recent`, which is deterministic.

use crate::db::DbError;
use crate::model::task::{GeoPoint, Task, TaskId, TaskValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    scheduled_time,
    done,
    last_updated,
    synced,
    location_lat,
    location_lng
FROM tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Local-store failure. Fatal to the triggering operation only, never to
/// the process.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Local Store contract.
pub trait TaskRepository {
    /// Idempotent full-record upsert by `id`.
    fn put(&self, task: &Task) -> StoreResult<()>;
    /// Every stored task, enumeration order unspecified.
    fn get_all(&self) -> StoreResult<Vec<Task>>;
    /// Display read path, sorted `last_updated DESC, id ASC`.
    fn list_recent(&self) -> StoreResult<Vec<Task>>;
    /// Count of tasks with `done = false`, independent of sync state.
    fn pending_count(&self) -> StoreResult<usize>;
}

/// SQLite-backed task repository over an injected connection.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn put(&self, task: &Task) -> StoreResult<()> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                scheduled_time,
                done,
                last_updated,
                synced,
                location_lat,
                location_lng
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                scheduled_time = excluded.scheduled_time,
                done = excluded.done,
                last_updated = excluded.last_updated,
                synced = excluded.synced,
                location_lat = excluded.location_lat,
                location_lng = excluded.location_lng;",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.scheduled_time.as_str(),
                bool_to_int(task.done),
                task.last_updated,
                bool_to_int(task.synced),
                task.location.map(|point| point.lat),
                task.location.map(|point| point.lng),
            ],
        )?;

        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!("{TASK_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn list_recent(&self) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} ORDER BY last_updated DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn pending_count(&self) -> StoreResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM tasks WHERE done = 0;", [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let id_text: String = row.get("id")?;
    let id: TaskId = Uuid::parse_str(&id_text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{id_text}` in tasks.id")))?;

    let done = parse_flag(row.get::<_, i64>("done")?, "tasks.done")?;
    let synced = parse_flag(row.get::<_, i64>("synced")?, "tasks.synced")?;

    let location = match (
        row.get::<_, Option<f64>>("location_lat")?,
        row.get::<_, Option<f64>>("location_lng")?,
    ) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        (None, None) => None,
        _ => {
            return Err(StoreError::InvalidData(format!(
                "half-present location for task `{id_text}`"
            )));
        }
    };

    let task = Task {
        id,
        title: row.get("title")?,
        scheduled_time: row.get("scheduled_time")?,
        done,
        last_updated: row.get("last_updated")?,
        synced,
        location,
    };
    task.validate()?;
    Ok(task)
}

fn parse_flag(value: i64, column: &str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

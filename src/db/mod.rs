use crate::error::AuditError;
use crate::models::lighthouse::AuditReport;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};
use std::path::Path;

/// Persistence collaborator for finished reports.
pub trait AuditStore: Send + Sync {
    /// Stores `report` and returns its new id.
    fn save(&self, report: &AuditReport) -> Result<i64, AuditError>;

    /// Newest first, optionally restricted to one URL.
    fn list(&self, limit: usize, url: Option<&str>) -> Result<Vec<AuditReport>, AuditError>;

    fn get(&self, id: i64) -> Result<Option<AuditReport>, AuditError>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS audits (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    url            TEXT NOT NULL,
    date           TEXT NOT NULL,
    globalScore    REAL NOT NULL,
    categoryScores TEXT NOT NULL,
    checklist      TEXT NOT NULL,
    topActions     TEXT NOT NULL
)";

const COLUMNS: &str = "id, url, date, globalScore, categoryScores, checklist, topActions";

pub struct SqliteAuditStore {
    db_pool: Pool<SqliteConnectionManager>,
}

impl SqliteAuditStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let pool = Pool::new(SqliteConnectionManager::file(path))?;
        Self::init(pool)
    }

    /// Every in-memory connection is its own database, so the pool holds exactly one.
    pub fn open_in_memory() -> Result<Self, AuditError> {
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())?;
        Self::init(pool)
    }

    fn init(db_pool: Pool<SqliteConnectionManager>) -> Result<Self, AuditError> {
        db_pool.get()?.execute(SCHEMA, ())?;
        Ok(Self { db_pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, AuditError> {
        Ok(self.db_pool.get()?)
    }
}

// Columns as stored; the JSON ones are decoded afterwards
struct AuditRow {
    id: i64,
    url: String,
    date: String,
    global_score: f64,
    category_scores: String,
    checklist: String,
    top_actions: String,
}

impl AuditRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AuditRow {
            id: row.get(0)?,
            url: row.get(1)?,
            date: row.get(2)?,
            global_score: row.get(3)?,
            category_scores: row.get(4)?,
            checklist: row.get(5)?,
            top_actions: row.get(6)?,
        })
    }

    fn into_report(self) -> Result<AuditReport, AuditError> {
        let date = chrono::DateTime::parse_from_rfc3339(&self.date)
            .map_err(|e| AuditError::Persistence(format!("bad date for audit {}: {}", self.id, e)))?
            .with_timezone(&chrono::Utc);

        Ok(AuditReport {
            id: Some(self.id),
            url: self.url,
            date,
            global_score: self.global_score.round().clamp(0.0, 100.0) as u8,
            category_scores: serde_json::from_str(&self.category_scores)?,
            checklist: serde_json::from_str(&self.checklist)?,
            top_actions: serde_json::from_str(&self.top_actions)?,
        })
    }
}

impl AuditStore for SqliteAuditStore {
    fn save(&self, report: &AuditReport) -> Result<i64, AuditError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO audits (url, date, globalScore, categoryScores, checklist, topActions)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                report.url,
                report.date.to_rfc3339(),
                report.global_score as f64,
                serde_json::to_string(&report.category_scores)?,
                serde_json::to_string(&report.checklist)?,
                serde_json::to_string(&report.top_actions)?,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn list(&self, limit: usize, url: Option<&str>) -> Result<Vec<AuditReport>, AuditError> {
        let conn = self.conn()?;
        let limit = limit as i64;

        let rows = match url {
            Some(url) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM audits WHERE url = ?1 ORDER BY id DESC LIMIT ?2",
                    COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![url, limit], AuditRow::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM audits ORDER BY id DESC LIMIT ?1",
                    COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![limit], AuditRow::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };

        rows.into_iter().map(AuditRow::into_report).collect()
    }

    fn get(&self, id: i64) -> Result<Option<AuditReport>, AuditError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM audits WHERE id = ?1", COLUMNS),
                params![id],
                AuditRow::from_row,
            )
            .optional()?;

        row.map(AuditRow::into_report).transpose()
    }
}

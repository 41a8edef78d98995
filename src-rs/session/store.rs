use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::debug;

use super::types::{SessionError, SessionItem};

const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS agent_sessions (
    session_id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS agent_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    message_data TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (session_id) REFERENCES agent_sessions(session_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_agent_messages_session ON agent_messages(session_id, id);
"#;

/// Durable conversation log for one session key.
///
/// Safe to share across threads: the connection sits behind a mutex, and
/// `add_items` writes a whole batch in one transaction, so concurrent runs
/// append without interleaving inside a batch.
pub struct SqliteSession {
    session_id: String,
    conn: Mutex<Connection>,
}

impl SqliteSession {
    pub fn open(path: impl AsRef<Path>, session_id: &str) -> Result<Self, SessionError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), session_id, "opened session database");
        Self::from_connection(conn, session_id)
    }

    pub fn in_memory(session_id: &str) -> Result<Self, SessionError> {
        Self::from_connection(Connection::open_in_memory()?, session_id)
    }

    fn from_connection(conn: Connection, session_id: &str) -> Result<Self, SessionError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            session_id: session_id.to_string(),
            conn: Mutex::new(conn),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Items in chronological order. With a limit, only the latest `limit`
    /// items are returned (still oldest first).
    pub fn get_items(&self, limit: Option<usize>) -> Result<Vec<SessionItem>, SessionError> {
        let conn = self.lock()?;
        let rows: Vec<String> = match limit {
            None => {
                let mut stmt = conn.prepare(
                    "SELECT message_data FROM agent_messages WHERE session_id = ?1 ORDER BY id ASC",
                )?;
                let rows = stmt.query_map(params![self.session_id], |row| row.get(0))?;
                rows.collect::<Result<_, _>>()?
            }
            Some(limit) => {
                let mut stmt = conn.prepare(
                    "SELECT message_data FROM (
                        SELECT id, message_data FROM agent_messages
                        WHERE session_id = ?1 ORDER BY id DESC LIMIT ?2
                    ) ORDER BY id ASC",
                )?;
                let rows = stmt.query_map(params![self.session_id, limit as i64], |row| row.get(0))?;
                rows.collect::<Result<_, _>>()?
            }
        };

        rows.iter()
            .map(|data| serde_json::from_str(data).map_err(SessionError::from))
            .collect()
    }

    pub fn add_items(&self, items: &[SessionItem]) -> Result<(), SessionError> {
        if items.is_empty() {
            return Ok(());
        }
        let encoded = items
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let now = Utc::now().to_rfc3339();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO agent_sessions (session_id, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![self.session_id, now],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO agent_messages (session_id, message_data, created_at) VALUES (?1, ?2, ?3)",
            )?;
            for data in &encoded {
                stmt.execute(params![self.session_id, data, now])?;
            }
        }
        tx.execute(
            "UPDATE agent_sessions SET updated_at = ?2 WHERE session_id = ?1",
            params![self.session_id, now],
        )?;
        tx.commit()?;
        debug!(session_id = %self.session_id, count = items.len(), "appended session items");
        Ok(())
    }

    /// Drops every item of this session key.
    pub fn clear(&self) -> Result<(), SessionError> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM agent_messages WHERE session_id = ?1",
            params![self.session_id],
        )?;
        conn.execute(
            "DELETE FROM agent_sessions WHERE session_id = ?1",
            params![self.session_id],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SessionError> {
        self.conn.lock().map_err(|_| SessionError::Lock)
    }
}

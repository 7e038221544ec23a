use chrono::Utc;
use crate::errors::FuzzgateError;
use crate::models::{ApiId, ApiInfo};
use super::Database;

impl Database {
    /// Insert or update an inventory entry. The fuzzing flag is left alone.
    pub fn upsert_api(&self, api: &ApiInfo) -> Result<(), FuzzgateError> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO apis (id, name, namespace, port, in_fuzzing, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, namespace = excluded.namespace, port = excluded.port, updated_at = excluded.updated_at",
            rusqlite::params![api.id, api.name, api.namespace, api.port, now],
        ).map_err(|e| FuzzgateError::Database(format!("Failed to upsert api: {}", e)))?;
        Ok(())
    }

    pub fn get_api(&self, id: ApiId) -> Result<Option<ApiInfo>, FuzzgateError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, namespace, port FROM apis WHERE id = ?1")
            .map_err(|e| FuzzgateError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![id], |row: &rusqlite::Row| {
            Ok(ApiInfo {
                id: row.get(0)?,
                name: row.get(1)?,
                namespace: row.get(2)?,
                port: row.get(3)?,
            })
        });

        match result {
            Ok(api) => Ok(Some(api)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(FuzzgateError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn list_apis(&self) -> Result<Vec<ApiInfo>, FuzzgateError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, namespace, port FROM apis ORDER BY id")
            .map_err(|e| FuzzgateError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], |row: &rusqlite::Row| {
            Ok(ApiInfo {
                id: row.get(0)?,
                name: row.get(1)?,
                namespace: row.get(2)?,
                port: row.get(3)?,
            })
        }).map_err(|e| FuzzgateError::Database(format!("Query error: {}", e)))?;

        let mut apis = Vec::new();
        for row in rows {
            apis.push(row.map_err(|e| FuzzgateError::Database(format!("Row error: {}", e)))?);
        }
        Ok(apis)
    }
}

use chrono::Utc;
use crate::errors::FuzzgateError;
use crate::models::{ApiId, Notification};
use super::Database;

impl Database {
    pub fn insert_notification(&self, module: &str, api_id: ApiId, notification: &Notification) -> Result<String, FuzzgateError> {
        let conn = self.lock()?;
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO notifications (id, api_id, module, notification_type, payload, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                id,
                api_id,
                module,
                notification.notification_type(),
                serde_json::to_string(notification)?,
                Utc::now().to_rfc3339(),
            ],
        ).map_err(|e| FuzzgateError::Database(format!("Failed to insert notification: {}", e)))?;
        Ok(id)
    }

    /// Most recent notifications for an API, oldest first.
    pub fn list_notifications(&self, api_id: ApiId, limit: usize) -> Result<Vec<serde_json::Value>, FuzzgateError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, module, notification_type, payload, created_at FROM notifications WHERE api_id = ?1 ORDER BY rowid DESC LIMIT ?2"
        ).map_err(|e| FuzzgateError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![api_id, limit as i64], |row: &rusqlite::Row| {
            let payload: String = row.get(3)?;
            Ok(serde_json::json!({
                "id": row.get::<_, String>(0)?,
                "module": row.get::<_, String>(1)?,
                "notification_type": row.get::<_, String>(2)?,
                "payload": serde_json::from_str::<serde_json::Value>(&payload).unwrap_or(serde_json::Value::Null),
                "created_at": row.get::<_, String>(4)?,
            }))
        }).map_err(|e| FuzzgateError::Database(format!("Query error: {}", e)))?;

        let mut results: Vec<serde_json::Value> = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| FuzzgateError::Database(format!("Row error: {}", e)))?);
        }
        results.reverse();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiFindings, ShortTestProgress};

    fn progress(p: u8) -> Notification {
        Notification::TestProgressNotification(ShortTestProgress { api_id: 2, progress: p, starttime: 5 })
    }

    #[test]
    fn test_db_insert_and_list_notifications() {
        let db = Database::in_memory().unwrap();
        db.insert_notification("fuzzer", 2, &progress(10)).unwrap();
        db.insert_notification("fuzzer", 2, &Notification::ApiFindingsNotification(ApiFindings::default())).unwrap();
        db.insert_notification("fuzzer", 3, &progress(20)).unwrap();

        let rows = db.list_notifications(2, 10).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["notification_type"], "TestProgressNotification");
        assert_eq!(rows[0]["payload"]["progress"], 10);
        assert_eq!(rows[1]["notification_type"], "ApiFindingsNotification");
    }

    #[test]
    fn test_db_list_notifications_limit_keeps_latest() {
        let db = Database::in_memory().unwrap();
        for p in [10, 20, 30] {
            db.insert_notification("fuzzer", 2, &progress(p)).unwrap();
        }
        let rows = db.list_notifications(2, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["payload"]["progress"], 20);
        assert_eq!(rows[1]["payload"]["progress"], 30);
    }
}

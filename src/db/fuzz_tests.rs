use chrono::Utc;
use crate::errors::FuzzgateError;
use crate::models::{ApiId, Report, Test, TestParameters};
use crate::session::ApiFuzzState;
use super::Database;

impl Database {
    /// Load the fuzzing flag and test history of an API.
    /// Returns `None` when the API is not in the inventory.
    pub fn load_fuzz_state(&self, api_id: ApiId) -> Result<Option<ApiFuzzState>, FuzzgateError> {
        let conn = self.lock()?;

        let in_fuzzing = match conn.query_row(
            "SELECT in_fuzzing FROM apis WHERE id = ?1",
            rusqlite::params![api_id],
            |row: &rusqlite::Row| row.get::<_, bool>(0),
        ) {
            Ok(v) => v,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(FuzzgateError::Database(format!("Query error: {}", e))),
        };

        let mut stmt = conn.prepare(
            "SELECT timestamp, start_time, input_json, report_json, findings_json FROM fuzz_tests WHERE api_id = ?1 ORDER BY timestamp ASC"
        ).map_err(|e| FuzzgateError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![api_id], |row: &rusqlite::Row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        }).map_err(|e| FuzzgateError::Database(format!("Query error: {}", e)))?;

        let mut tests = Vec::new();
        for row in rows {
            let (timestamp, start_time, input_json, report_json, findings_json) =
                row.map_err(|e| FuzzgateError::Database(format!("Row error: {}", e)))?;
            let input: TestParameters = serde_json::from_str(&input_json)?;
            let report: Report = serde_json::from_str(&report_json)?;
            let findings: Option<serde_json::Value> = findings_json
                .map(|f| serde_json::from_str(&f))
                .transpose()?;
            tests.push(Test { timestamp, start_time, report, findings, input });
        }

        Ok(Some(ApiFuzzState { in_fuzzing, tests }))
    }

    /// Write the fuzzing flag and the current test of an API in one transaction.
    ///
    /// Only the last test is ever mutated, so earlier rows are left as stored.
    pub fn save_fuzz_state(&self, api_id: ApiId, state: &ApiFuzzState) -> Result<(), FuzzgateError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()
            .map_err(|e| FuzzgateError::Database(format!("Failed to begin transaction: {}", e)))?;

        let updated = tx.execute(
            "UPDATE apis SET in_fuzzing = ?2, updated_at = ?3 WHERE id = ?1",
            rusqlite::params![api_id, state.in_fuzzing, Utc::now().to_rfc3339()],
        ).map_err(|e| FuzzgateError::Database(format!("Update failed: {}", e)))?;
        if updated == 0 {
            return Err(FuzzgateError::NotFound(format!("API {} is not in the inventory", api_id)));
        }

        if let Some(test) = state.last_test() {
            let findings_json = test.findings.as_ref().map(serde_json::to_string).transpose()?;
            tx.execute(
                "INSERT OR REPLACE INTO fuzz_tests (api_id, timestamp, start_time, status, input_json, report_json, findings_json) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    api_id,
                    test.timestamp,
                    test.start_time,
                    test.report.status.as_str(),
                    serde_json::to_string(&test.input)?,
                    serde_json::to_string(&test.report)?,
                    findings_json,
                ],
            ).map_err(|e| FuzzgateError::Database(format!("Failed to store test: {}", e)))?;
        }

        tx.commit()
            .map_err(|e| FuzzgateError::Database(format!("Failed to commit: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiInfo, Depth, FuzzingStatus};
    use serde_json::json;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.upsert_api(&ApiInfo { id: 9, name: "payments".into(), namespace: None, port: 443 }).unwrap();
        db
    }

    fn params() -> TestParameters {
        TestParameters::new(Depth::Deep, "bearer")
    }

    #[test]
    fn test_db_load_unknown_api() {
        let db = Database::in_memory().unwrap();
        assert!(db.load_fuzz_state(1).unwrap().is_none());
    }

    #[test]
    fn test_db_load_fresh_api_is_empty() {
        let db = setup();
        let state = db.load_fuzz_state(9).unwrap().unwrap();
        assert!(!state.in_fuzzing);
        assert!(state.tests.is_empty());
    }

    #[test]
    fn test_db_save_and_load_state() {
        let db = setup();
        let mut state = ApiFuzzState::default();
        state.begin_test(9, 100, params()).unwrap();
        state.tests[0].report.progress = 30;
        db.save_fuzz_state(9, &state).unwrap();

        let loaded = db.load_fuzz_state(9).unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_db_save_replaces_updated_tests() {
        let db = setup();
        let mut state = ApiFuzzState::default();
        state.begin_test(9, 100, params()).unwrap();
        db.save_fuzz_state(9, &state).unwrap();

        state.tests[0].findings = Some(json!({"items": [{"id": 1}]}));
        state.terminate_current("cancelled");
        db.save_fuzz_state(9, &state).unwrap();
        state.begin_test(9, 100, params()).unwrap();
        db.save_fuzz_state(9, &state).unwrap();

        let loaded = db.load_fuzz_state(9).unwrap().unwrap();
        assert_eq!(loaded.tests.len(), 2);
        assert_eq!(loaded.tests[0].report.status, FuzzingStatus::Error);
        assert_eq!(loaded.tests[0].findings, Some(json!({"items": [{"id": 1}]})));
        assert_eq!(loaded.tests[1].timestamp, 101);
        assert!(loaded.in_fuzzing);
    }

    #[test]
    fn test_db_save_leaves_earlier_tests_untouched() {
        let db = setup();
        let mut state = ApiFuzzState::default();
        state.begin_test(9, 100, params()).unwrap();
        state.terminate_current("cancelled");
        db.save_fuzz_state(9, &state).unwrap();
        state.begin_test(9, 200, params()).unwrap();
        db.save_fuzz_state(9, &state).unwrap();

        // Earlier history is immutable; a stray in-memory edit is never written back.
        state.tests[0].report.status_message = Some("rewritten".into());
        state.tests[1].report.progress = 50;
        db.save_fuzz_state(9, &state).unwrap();

        let loaded = db.load_fuzz_state(9).unwrap().unwrap();
        assert_eq!(loaded.tests[0].report.status_message.as_deref(), Some("cancelled"));
        assert_eq!(loaded.tests[1].report.progress, 50);
    }

    #[test]
    fn test_db_save_unknown_api_fails() {
        let db = Database::in_memory().unwrap();
        let err = db.save_fuzz_state(77, &ApiFuzzState::default()).unwrap_err();
        assert!(matches!(err, FuzzgateError::NotFound(_)));
    }
}

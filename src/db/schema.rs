pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS apis (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    namespace TEXT,
    port INTEGER NOT NULL,
    in_fuzzing INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS fuzz_tests (
    api_id INTEGER NOT NULL REFERENCES apis(id) ON DELETE CASCADE,
    timestamp INTEGER NOT NULL,
    start_time INTEGER NOT NULL,
    status TEXT NOT NULL,
    input_json TEXT NOT NULL,
    report_json TEXT NOT NULL,
    findings_json TEXT,
    PRIMARY KEY (api_id, timestamp)
);

CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    api_id INTEGER NOT NULL,
    module TEXT NOT NULL,
    notification_type TEXT NOT NULL,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_fuzz_tests_api ON fuzz_tests(api_id);
CREATE INDEX IF NOT EXISTS idx_fuzz_tests_status ON fuzz_tests(status);
CREATE INDEX IF NOT EXISTS idx_notifications_api ON notifications(api_id);
";

use serde::{Deserialize, Serialize};
use crate::errors::FuzzgateError;
use crate::models::{ApiId, FuzzingStatus, Test, TestParameters};

/// Fuzzing state of a single API: the exclusivity flag and its test history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFuzzState {
    pub in_fuzzing: bool,
    /// Append-only, oldest first.
    pub tests: Vec<Test>,
}

impl ApiFuzzState {
    pub fn last_test(&self) -> Option<&Test> {
        self.tests.last()
    }

    pub fn last_test_mut(&mut self) -> Option<&mut Test> {
        self.tests.last_mut()
    }

    pub fn test_by_timestamp(&self, timestamp: i64) -> Option<&Test> {
        self.tests.iter().find(|t| t.timestamp == timestamp)
    }

    /// Timestamp for a test starting at `now`, strictly after every earlier one.
    pub fn next_timestamp(&self, now: i64) -> i64 {
        match self.tests.last() {
            Some(last) if now <= last.timestamp => last.timestamp + 1,
            _ => now,
        }
    }

    /// Open a new IN_PROGRESS test and take the exclusivity flag.
    pub fn begin_test(&mut self, api_id: ApiId, now: i64, input: TestParameters) -> Result<i64, FuzzgateError> {
        if self.in_fuzzing {
            return Err(FuzzgateError::InvalidParameter(format!(
                "API {} already has a fuzzing session in progress",
                api_id
            )));
        }
        let timestamp = self.next_timestamp(now);
        self.tests.push(Test::new(timestamp, now, input));
        self.in_fuzzing = true;
        Ok(timestamp)
    }

    /// Close the current test with ERROR and release the exclusivity flag.
    /// An already terminal test is left untouched.
    pub fn terminate_current(&mut self, message: impl Into<String>) {
        if let Some(test) = self.tests.last_mut() {
            if !test.is_terminal() {
                test.report.terminate(FuzzingStatus::Error, message);
            }
        }
        self.in_fuzzing = false;
    }

    /// The exclusivity flag mirrors whether the last test is still running.
    pub fn is_consistent(&self) -> bool {
        let last_running = self.tests.last().is_some_and(|t| !t.is_terminal());
        self.in_fuzzing == last_running
            && self.tests.iter().rev().skip(1).all(Test::is_terminal)
    }
}

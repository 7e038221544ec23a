use crate::models::{FuzzingStatus, Report, StatusUpdate};

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub report: Report,
    /// True only for the delivery that closes a still-running test.
    pub completion_edge: bool,
}

/// Fold a runner status delivery into the current report.
///
/// Running test: every field is overwritten with the delivery (last write
/// wins, out-of-order progress included). The test closes when the delivery
/// carries `progress == 100` with a status other than IN_PROGRESS; until then
/// its status stays IN_PROGRESS. A NOT_STARTED status at 100% closes the test
/// as ERROR.
///
/// Closed test: the delivery is recorded (tags, severity, message and a
/// terminal status) but progress stays at 100 and the test never reopens.
pub fn merge(current: &Report, update: &StatusUpdate) -> MergeOutcome {
    let mut report = Report {
        status: current.status,
        progress: current.progress,
        highest_severity: update.highest_severity,
        status_message: update.status_message.clone(),
        tags: update.tags.clone(),
    };

    if current.status.is_terminal() {
        if update.progress == 100 && update.status.is_terminal() {
            report.status = update.status;
        }
        return MergeOutcome { report, completion_edge: false };
    }

    report.progress = update.progress;
    let completes = update.progress == 100 && update.status != FuzzingStatus::InProgress;
    report.status = match update.status {
        status if completes && status.is_terminal() => status,
        _ if completes => FuzzingStatus::Error,
        _ => FuzzingStatus::InProgress,
    };

    MergeOutcome { report, completion_edge: completes }
}

//! Export schema — per-step CSV rows and capped audit slices.
//!
//! The engine owns no files or sockets; these helpers only *format*.
//! Writing the output anywhere is the caller's concern.

use dialectica_engine::StepRecord;

/// Column layout of the per-step CSV export.
pub const CSV_HEADER: &str =
    "step,A,anti_A,tension,XEPTQLRI,paradox_score,stage,stage_name,phase,phase_name";

/// One CSV row for a step record, matching [`CSV_HEADER`].
pub fn csv_row(record: &StepRecord) -> String {
    format!(
        "{},{:.6},{:.6},{:.6},{:.6},{:.6},{},{},{},{}",
        record.step,
        record.state,
        record.negation,
        record.tension,
        record.risk_index,
        record.paradox_score,
        record.stage.index(),
        record.stage.name(),
        record.phase.index(),
        record.phase.name(),
    )
}

/// Full CSV document (header + one row per record), trailing newline
/// included.
///
/// Audit surfaces should pass [`dialectica_engine::HistoryStore::audit_log`]
/// here rather than the full record slice, keeping exports capped at
/// [`dialectica_engine::AUDIT_LOG_CAP`] rows.
pub fn csv_document(records: &[StepRecord]) -> String {
    let mut out = String::with_capacity((records.len() + 1) * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&csv_row(record));
        out.push('\n');
    }
    out
}

/// Cap an event log for export: the most recent
/// [`dialectica_engine::AUDIT_LOG_CAP`] entries.
pub fn capped<T>(events: &[T]) -> &[T] {
    let n = events.len();
    &events[n.saturating_sub(dialectica_engine::AUDIT_LOG_CAP)..]
}

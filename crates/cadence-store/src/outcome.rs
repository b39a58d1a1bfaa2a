//! Structured results returned by the store.

use serde::Serialize;

/// Phase of the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "final")]
    Final,
}

/// Summary of a frozen run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Position of the terminator that completed the run.
    pub final_seq: i64,
    /// Number of positions in the message (`1..final_seq-1`).
    pub steps_counted: usize,
    /// Message length in chars.
    pub message_length: usize,
    pub repeating_unit_length: usize,
}

/// Why a terminator could not complete the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapReport {
    pub final_seq: i64,
    pub missing_count: u64,
    /// First missing positions, ascending.
    #[serde(rename = "missing_first_10")]
    pub missing_first: Vec<i64>,
    /// Length in chars of what is present in `1..final_seq-1`.
    pub message_length: usize,
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Submission {
    /// Content stored; nothing else happened.
    Accepted { seq: i64 },
    /// Terminator completed the run, which is now frozen.
    #[serde(rename = "complete")]
    Finalized(RunSummary),
}

/// Result of a count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountView {
    #[serde(rename = "instruction_count")]
    pub count: usize,
    pub status: Phase,
}

/// Ordered view of the run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListView {
    pub instructions: Vec<String>,
    pub status: Phase,
    /// Number of entries in `instructions`.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<i64>>,
    /// Missing positions in the whole range, even when truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_seq: Option<i64>,
    /// Highest terminator position currently held by a live run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_terminator: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set when the live range was longer than the listing cap.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

/// Point-in-time status of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// Entries held by the live map, terminators included.
    pub live_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

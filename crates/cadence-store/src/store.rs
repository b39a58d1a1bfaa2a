//! The sequence store: one run, one lock.
//!
//! Every operation takes the same mutex for its whole duration and does only
//! point computation inside it (map upsert, linear scans, the linear-time
//! period). Nothing awaits or does I/O while the lock is held.

use crate::error::{Result, SubmitError};
use crate::fragment::{Fragment, Slot};
use crate::outcome::{CountView, GapReport, ListView, Phase, RunSummary, Snapshot, Submission};
use cadence_period::repeating_unit_length;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Default number of missing positions listed in a gap report.
pub const DEFAULT_MISSING_PREVIEW: usize = 10;

/// Default number of positions a live listing materializes.
pub const DEFAULT_LIST_LIMIT: usize = 100_000;

/// Store tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many missing positions a gap report enumerates.
    pub missing_preview: usize,
    /// Most positions a live listing builds before it is truncated.
    pub list_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            missing_preview: DEFAULT_MISSING_PREVIEW,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Live fragments keyed by sequence number. Sparse: keys may be negative,
/// huge, or far apart.
#[derive(Debug, Default)]
struct LiveRun {
    entries: HashMap<i64, Fragment>,
}

impl LiveRun {
    fn slot(&self, pos: i64) -> Slot<'_> {
        match self.entries.get(&pos).and_then(Fragment::as_content) {
            Some(text) => Slot::Present(text),
            None => Slot::Absent,
        }
    }

    fn content_count(&self) -> usize {
        self.entries.values().filter(|f| !f.is_terminator()).count()
    }

    /// Check `1..final_seq` for gaps.
    ///
    /// Cost is bounded by the entries held plus the preview size, so a
    /// terminator at an absurd position is cheap to reject.
    fn find_gaps(&self, final_seq: i64, preview: usize) -> Option<GapReport> {
        let span = span_len(final_seq);
        let mut present = 0u64;
        let mut message_length = 0;
        for (&seq, fragment) in &self.entries {
            if (1..final_seq).contains(&seq) {
                if let Fragment::Content(text) = fragment {
                    present += 1;
                    message_length += text.chars().count();
                }
            }
        }

        let missing_count = span - present;
        if missing_count == 0 {
            return None;
        }

        let limit = preview.min(usize::try_from(missing_count).unwrap_or(usize::MAX));
        let missing_first = (1..final_seq)
            .filter(|&pos| self.slot(pos).is_absent())
            .take(limit)
            .collect();

        Some(GapReport {
            final_seq,
            missing_count,
            missing_first,
            message_length,
        })
    }

    /// Move the texts for `1..final_seq` out of the map. Caller has already
    /// checked there are no gaps.
    fn drain_ordered(&mut self, final_seq: i64) -> Vec<String> {
        let mut entries = std::mem::take(&mut self.entries);
        (1..final_seq)
            .map(|pos| match entries.remove(&pos) {
                Some(Fragment::Content(text)) => text,
                _ => String::new(),
            })
            .collect()
    }

    fn highest_terminator(&self) -> Option<i64> {
        self.entries
            .iter()
            .filter(|(_, f)| f.is_terminator())
            .map(|(&seq, _)| seq)
            .max()
    }

    /// Positions `1..=end` in order.
    ///
    /// `end` is the highest key held, minus one when that key is a
    /// terminator. Terminators below `end` are not content and are reported
    /// missing, same as in `find_gaps`. At most `limit` positions are built;
    /// `missing_count` always covers the whole range.
    fn list(&self, include_message: bool, limit: usize) -> ListView {
        let Some(max_key) = self.entries.keys().copied().max() else {
            return ListView {
                status: Phase::InProgress,
                missing: Some(Vec::new()),
                missing_count: Some(0),
                message: include_message.then(String::new),
                ..ListView::default()
            };
        };

        let end = match self.entries.get(&max_key) {
            Some(Fragment::Terminator) => max_key.saturating_sub(1),
            _ => max_key,
        };
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let listed_end = end.min(limit);

        let present = self
            .entries
            .iter()
            .filter(|(&seq, f)| (1..=end).contains(&seq) && !f.is_terminator())
            .count() as u64;
        let missing_count = span_len(end.saturating_add(1)) - present;

        let mut instructions = Vec::new();
        let mut missing = Vec::new();
        for pos in 1..=listed_end {
            let slot = self.slot(pos);
            if slot.is_absent() {
                missing.push(pos);
            }
            instructions.push(slot.text().to_string());
        }

        ListView {
            count: instructions.len(),
            message: include_message.then(|| instructions.concat()),
            instructions,
            status: Phase::InProgress,
            missing_count: Some(missing_count),
            missing: Some(missing),
            end_seq: Some(end),
            pending_terminator: self.highest_terminator(),
            truncated: end > listed_end,
        }
    }
}

/// A completed run. Immutable until reset.
#[derive(Debug)]
struct FrozenRun {
    ordered: Vec<String>,
    summary: RunSummary,
}

impl FrozenRun {
    fn freeze(final_seq: i64, ordered: Vec<String>) -> Self {
        let message = ordered.concat();
        let summary = RunSummary {
            final_seq,
            steps_counted: ordered.len(),
            message_length: message.chars().count(),
            repeating_unit_length: repeating_unit_length(&message),
        };
        Self { ordered, summary }
    }

    fn list(&self, include_message: bool) -> ListView {
        ListView {
            instructions: self.ordered.clone(),
            status: Phase::Final,
            count: self.ordered.len(),
            message: include_message.then(|| self.ordered.concat()),
            ..ListView::default()
        }
    }
}

/// Live or frozen. A single enum so the finalized flag and the frozen data
/// can never disagree.
#[derive(Debug)]
enum RunState {
    Live(LiveRun),
    Finalized(FrozenRun),
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Live(LiveRun::default())
    }
}

/// Shared ingest state for one logical run.
///
/// Wrap in an `Arc` and hand it to every caller; all methods take `&self`.
#[derive(Debug, Default)]
pub struct SequenceStore {
    config: StoreConfig,
    run: Mutex<RunState>,
}

impl SequenceStore {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            run: Mutex::new(RunState::default()),
        }
    }

    /// Upsert a fragment at `seq`.
    ///
    /// Content is stored (last write wins) and accepted. A terminator checks
    /// positions `1..seq` and either freezes the run or reports the gaps,
    /// leaving the run live. Once frozen, every submission is rejected.
    pub fn submit(&self, seq: i64, fragment: Fragment) -> Result<Submission> {
        let mut run = self.run.lock();

        let live = match &mut *run {
            RunState::Finalized(frozen) => {
                tracing::warn!(
                    "Rejected seq {}: run already finalized at {}",
                    seq,
                    frozen.summary.final_seq
                );
                return Err(SubmitError::AlreadyFinalized {
                    final_seq: frozen.summary.final_seq,
                });
            }
            RunState::Live(live) => live,
        };

        let is_terminator = fragment.is_terminator();
        live.entries.insert(seq, fragment);

        if !is_terminator {
            tracing::debug!("Accepted fragment {}", seq);
            return Ok(Submission::Accepted { seq });
        }

        if let Some(report) = live.find_gaps(seq, self.config.missing_preview) {
            tracing::debug!(
                "Terminator at {} incomplete: {} missing",
                seq,
                report.missing_count
            );
            return Err(SubmitError::SequenceGap(report));
        }

        let ordered = live.drain_ordered(seq);
        let frozen = FrozenRun::freeze(seq, ordered);
        let summary = frozen.summary.clone();
        *run = RunState::Finalized(frozen);

        tracing::info!(
            "Run finalized at {}: {} steps, length {}, unit {}",
            summary.final_seq,
            summary.steps_counted,
            summary.message_length,
            summary.repeating_unit_length
        );
        Ok(Submission::Finalized(summary))
    }

    /// Number of fragments in the run.
    ///
    /// Frozen runs report their frozen count unless `force_live` asks for the
    /// live map instead. Terminators are never counted.
    pub fn count(&self, force_live: bool) -> CountView {
        let run = self.run.lock();
        match &*run {
            RunState::Live(live) => CountView {
                count: live.content_count(),
                status: Phase::InProgress,
            },
            RunState::Finalized(frozen) => CountView {
                count: if force_live { 0 } else { frozen.ordered.len() },
                status: Phase::Final,
            },
        }
    }

    /// Ordered view of the run, optionally with the concatenated message.
    ///
    /// A live run lists positions `1..=end` with holes as `""`. The listing
    /// is capped at `StoreConfig::list_limit` positions so one fragment at a
    /// huge sequence number cannot make this call unbounded under the lock;
    /// `truncated` is set when the cap applies.
    pub fn list(&self, include_message: bool) -> ListView {
        let run = self.run.lock();
        match &*run {
            RunState::Live(live) => live.list(include_message, self.config.list_limit),
            RunState::Finalized(frozen) => frozen.list(include_message),
        }
    }

    /// Discard everything and start a fresh live run.
    pub fn reset(&self) {
        let mut run = self.run.lock();
        *run = RunState::default();
        tracing::info!("Run reset");
    }

    /// Current phase and sizes.
    pub fn snapshot(&self) -> Snapshot {
        let run = self.run.lock();
        match &*run {
            RunState::Live(live) => Snapshot {
                phase: Phase::InProgress,
                live_entries: live.entries.len(),
                summary: None,
            },
            RunState::Finalized(frozen) => Snapshot {
                phase: Phase::Final,
                live_entries: 0,
                summary: Some(frozen.summary.clone()),
            },
        }
    }

    /// Summary of the frozen run, if finalized.
    pub fn summary(&self) -> Option<RunSummary> {
        self.snapshot().summary
    }
}

/// Number of positions in `1..final_seq`.
fn span_len(final_seq: i64) -> u64 {
    if final_seq <= 1 {
        0
    } else {
        final_seq.abs_diff(1)
    }
}

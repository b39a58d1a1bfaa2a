//! Cadence Sequence Store
//!
//! Callers submit numbered fragments in any order, from any number of
//! threads. The store reassembles them and, when a terminator arrives with
//! no gaps before it, freezes the message together with its minimal
//! repeating unit.
//!
//! # Lifecycle
//!
//! ```text
//! Live --terminator, gaps-----> Live       (retry allowed)
//! Live --terminator, no gaps--> Finalized  (one way)
//! Finalized --any submit------> Finalized  (rejected)
//! any --reset-----------------> Live       (full clear)
//! ```
//!
//! # Example
//!
//! ```
//! use cadence_store::{Fragment, SequenceStore, Submission};
//!
//! let store = SequenceStore::default();
//! store.submit(2, Fragment::content("ab")).unwrap();
//! store.submit(1, Fragment::content("ab")).unwrap();
//!
//! match store.submit(3, Fragment::Terminator).unwrap() {
//!     Submission::Finalized(summary) => assert_eq!(summary.repeating_unit_length, 2),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

mod error;
mod fragment;
mod outcome;
mod store;

pub use error::{Result, SubmitError};
pub use fragment::{Fragment, Slot};
pub use outcome::{CountView, GapReport, ListView, Phase, RunSummary, Snapshot, Submission};
pub use store::{SequenceStore, StoreConfig, DEFAULT_LIST_LIMIT, DEFAULT_MISSING_PREVIEW};

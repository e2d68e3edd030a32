//! Strategy-selection bandit.
//!
//! An epsilon-greedy learner over a fixed number of opaque arms, with JSON
//! persistence of its full state:
//! - `Bandit`: selection, value updates, statistics, save/restore
//! - `BanditSnapshot`: the on-disk document
//!
//! The bandit does no locking of its own. Callers serving concurrent requests
//! must serialize each select/update pair behind a single lock or writer.

pub mod bandit;
pub mod state;
pub mod storage;
pub mod types;

pub use bandit::Bandit;
pub use state::{BanditSnapshot, HISTORY_CAP, HistoryRecord};
pub use types::{BanditStatistics, Decision, LoadOutcome, Selection};

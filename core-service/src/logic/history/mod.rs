//! History Module - Decision Log
//!
//! Stores finished decisions with their sample in JSONL files with automatic
//! rotation. Owns no schema; each line is a self-contained `DecisionRecord`.
//! Write failures are logged by callers and never affect a decision.

pub mod record;
pub mod writer;


pub use record::DecisionRecord;
pub use writer::HistoryWriter;

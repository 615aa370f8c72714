//! Paired melody model interface.
//!
//! - [`PairedSequenceModel`](backend::PairedSequenceModel): Capability the generator delegates inference to
//! - [`SharedModel`](backend::SharedModel): Per-instance lock serializing inference calls

pub mod backend;

pub use backend::{PairedSequenceModel, SharedModel};

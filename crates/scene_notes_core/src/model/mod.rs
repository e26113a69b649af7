//! Domain model for the note sequence.
//!
//! # Responsibility
//! - Define the note record and its optional view snapshot.
//! - Define the ordered store that owns all sequence mutation.
//!
//! # Invariants
//! - The store is the only place that appends, removes, or moves the cursor.

pub mod note;
pub mod store;

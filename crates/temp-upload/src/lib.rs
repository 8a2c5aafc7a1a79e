//! Temp Upload Lifecycle
//!
//! Tracks one uploaded file from the moment it lands in temporary storage
//! until it is either moved to permanent storage on submit or deleted when
//! the form is abandoned.
//!
//! ```text
//! Empty ──upload──▶ Uploading ──ok──▶ Temporary ──submit──▶ Moving ──▶ Permanent
//!                       │                 │
//!                       └──err─▶ (prev)   └──abandon──▶ Deleting ──▶ Empty
//! ```
//!
//! A resource in `Moving` has no discard transition, so a cleanup that fires
//! while a submit is in flight does nothing.

mod driver;
mod state;

pub use driver::{
    claim_all, commit, discard, release, replace, settle, Discard, LifecycleError, Replaced, StateCell, UploadBackend,
};
pub use state::{Commit, Phase, Resource, TransitionError, UploadState};

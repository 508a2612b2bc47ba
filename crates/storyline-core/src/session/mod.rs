//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted authentication record
//! - `store`: the store trait and its replay-latest subscription
//!
//! # Usage
//!
//! ```ignore
//! use storyline_core::session::{Session, SessionStore, SessionSubscription};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::Session;
pub use store::{SessionPublisher, SessionStore, SessionSubscription};

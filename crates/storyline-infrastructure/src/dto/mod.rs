//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of locally persisted records.
//! They are private to the infrastructure layer and handle the evolution of
//! the storage format over time.
//!
//! ### Session Version History
//! - **1.0.0**: `email`, `token`, `isLoggedIn` only
//! - **1.1.0**: Added `userId` and `name`

mod session;

pub use session::{
    SESSION_ENTITY, SessionDTO, SessionV1_0_0, SessionV1_1_0, create_session_migrator,
};

//! Request and response types for the FieldOps API

/// Shared types used across endpoints
pub mod common;
/// Customer types
pub mod customer;
/// Invoice types
pub mod invoice;
/// Job types
pub mod job;
/// Scheduling types
pub mod scheduling;
/// Territory types
pub mod territory;

pub use common::{ListParams, Page};
pub use customer::Customer;
pub use invoice::Invoice;
pub use job::{Job, NewJob};
pub use scheduling::{AppointmentSlot, AvailabilityQuery};
pub use territory::Territory;

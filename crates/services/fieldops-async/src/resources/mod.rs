//! API resource implementations for the FieldOps client

/// Customers API resource
pub mod customers;
/// Invoices API resource
pub mod invoices;
/// Jobs API resource
pub mod jobs;
/// Scheduling API resource
pub mod scheduling;
/// Territories API resource
pub mod territories;

pub use customers::Customers;
pub use invoices::Invoices;
pub use jobs::Jobs;
pub use scheduling::Scheduling;
pub use territories::Territories;

//! Admission control
//!
//! Bounds how many calls each (provider, model) pair may receive within a
//! fixed window. Windows start lazily on the first registered use.

mod controller;
mod types;


pub use controller::AdmissionController;
pub use types::{QuotaLimit, QuotaUsage};

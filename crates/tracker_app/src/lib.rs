//! Terminal front-end for the job tracker.
pub mod platform;

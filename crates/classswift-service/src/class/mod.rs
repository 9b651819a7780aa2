//! Class and roster queries.

pub mod service;

pub use service::ClassService;

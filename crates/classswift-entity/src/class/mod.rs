//! Class entity.

pub mod model;

pub use model::Class;

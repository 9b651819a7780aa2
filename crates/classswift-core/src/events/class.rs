//! Class-scoped broadcast event kinds.
//!
//! These strings are part of the wire contract: they land in the `type`
//! field of every envelope delivered to viewers.

/// Roster or seat state changed; payload carries the refreshed roster.
pub const CLASS_UPDATED: &str = "class_updated";

//! # classswift-api
//!
//! HTTP API layer for the ClassSwift backend: Axum router, request
//! handlers, DTOs, middleware, error mapping, and the WebSocket upgrade
//! that feeds viewer connections into the session hub.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

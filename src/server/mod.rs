//! HTTP server for the chat resolver and the demo calculators.
//!
//! # Endpoints
//!
//! - `GET  /health`                - Liveness probe
//! - `POST /chat`                  - Resolve a chat message
//! - `POST /demos/mean`            - Mean calculator
//! - `POST /demos/excel/:function` - Spreadsheet function demo
//! - `GET  /demos/sample`          - Random sample data

pub mod routes;

pub use routes::{app_router, AppState};

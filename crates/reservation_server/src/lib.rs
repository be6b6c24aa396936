//! reservation-server
//!
//! # Introduction
//!
//! HTTP front end of the room reservation system. Clients create reservation
//! requests for a room and a range of dates, edit or cancel them while they
//! are pending, and approve them. Approval is refused when another approved
//! reservation of the same room overlaps the requested dates.
//!
//! # Routes
//!
//! All reservation routes live under `/api/v1/reservations`:
//! - `GET /` lists every reservation
//! - `GET /{id}` fetches one reservation
//! - `POST /` creates a pending reservation
//! - `PUT /{id}` edits a pending reservation
//! - `DELETE /{id}/cancel` cancels a pending reservation
//! - `POST /{id}/approve` approves a pending reservation

pub(crate) mod api;
pub mod app;
pub mod error;
pub(crate) mod reservations;

pub use app::{Server, ServerState};
pub use error::Error;

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub url: String,
    pub port: u16,
}

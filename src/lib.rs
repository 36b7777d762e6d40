//! Client library for the DIGILING school guidance portal: geofenced
//! attendance check-in, session and role handling, and thin clients for
//! the portal's REST endpoints. The REST backend itself is an external
//! collaborator.

pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod models;
pub mod services;
pub mod session;

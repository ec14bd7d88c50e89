//! Trip-planner diagram core.
//!
//! Turns a trip-planning itinerary into the data model consumed by a
//! schematic ("transitive") map renderer, and derives the active search,
//! itineraries and realtime effects from an application state snapshot.

pub mod config;
pub mod diagram;
pub mod domain;
pub mod location;
pub mod otp;
pub mod overlay;
pub mod state;

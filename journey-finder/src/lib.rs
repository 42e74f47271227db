//! Journey finder server.
//!
//! Lets a traveller pick an origin and a destination station, queries a
//! trip-planning backend whenever the choice changes, and shows the returned
//! itineraries with the time, money and CO2 each one saves.

pub mod backend;
pub mod config;
pub mod domain;
pub mod presenter;
pub mod query;
pub mod session;
pub mod web;

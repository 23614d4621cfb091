//! # Slotbook Core
//!
//! Domain model and engine for doctor appointment booking: slot generation
//! from weekly availability rules, exclusion filtering, and the locked
//! booking transaction that keeps a doctor's calendar free of overlaps.
//!
//! Nothing in this crate talks to a database or an HTTP client directly.
//! Storage is reached through the traits in [`store`].

pub mod errors;
pub mod filter;
pub mod generator;
pub mod interval;
pub mod models;
pub mod services;
pub mod store;
pub mod timezone;

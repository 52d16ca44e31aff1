//! Culture Insights - Privacy-preserving OCAI survey aggregation
//!
//! This crate turns raw Organizational Culture Assessment Instrument
//! responses into whole-organization and demographic-slice aggregates,
//! enforcing k-anonymity so no displayed figure describes fewer than the
//! configured number of people.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

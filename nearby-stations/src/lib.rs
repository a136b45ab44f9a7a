//! Nearby transit stations.
//!
//! Resolves a position or station id to one station record, reconciles the
//! records that describe the same physical stop, finds the routes serving
//! it, and reports its next departures together with the nearest other
//! stops.

pub mod app;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod geolocate;
pub mod refresh;
pub mod report;
pub mod resolve;
pub mod store;
pub mod web;

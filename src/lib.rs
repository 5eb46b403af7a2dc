//! Tip distribution engine for restaurant point-of-sale exports.
//!
//! This crate splits each order's tip evenly among the employees whose shift
//! covers the order's timestamp, then reports per-employee totals, worked
//! hours and per-order detail. Orders and timesheets arrive as header-keyed
//! CSV rows, described to the engine through a column mapping.
//!
//! The [`calculation`] module holds the engine, [`tabular`] reads uploads,
//! and [`api`] exposes both over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod tabular;

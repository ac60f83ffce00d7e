//! Travel Expense Audit Engine
//!
//! This crate ingests employee travel-expense exports, classifies each line
//! into a spending category and a canonical department, and aggregates the
//! result into dashboard statistics: category totals, violator and clean
//! rosters, a department violation ranking and headline KPIs.
//!
//! The pipeline is `ingest` (column resolution, per-line parsing) then
//! `aggregation`. The `api` module serves it over HTTP.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod assistant;
pub mod classification;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;

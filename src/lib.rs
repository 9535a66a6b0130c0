//! Shift pay and take-home tax estimation.
//!
//! This crate computes pay for logged work shifts (regular, overtime and
//! night-premium components over a fixed break policy) and estimates
//! Japanese income tax, resident tax and social-insurance deductions with
//! either a flat-rate or a progressive-bracket model. Shift records and
//! planned shifts live in an owned [`store::PayrollState`] persisted through
//! a [`store::ShiftStorage`] implementation, and [`summary`] and [`export`]
//! derive calendar views, earnings aggregates and text exports from it.
//!
//! Rates, shift types, tax tables and holidays are loaded from YAML with
//! [`config::ConfigLoader`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod summary;

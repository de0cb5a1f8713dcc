//! Air quality chat bot.
//!
//! Answers `air <city>` with the current pollutant readings of every GIOŚ
//! monitoring station in the best-matching Polish city.

pub mod cache;
pub mod color;
pub mod command;
pub mod conditions;
pub mod domain;
pub mod format;
pub mod fuzzy;
pub mod gios;
pub mod resolve;
pub mod stations;
pub mod web;

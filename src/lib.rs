//! Interactive filter/statistics dashboard over a tabular dataset.
//!
//! The dataset is loaded once ([`data`]), run through the
//! [`pipeline`] whenever a filter changes, and rendered by [`ui`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod format;
pub mod pipeline;
pub mod state;
pub mod ui;

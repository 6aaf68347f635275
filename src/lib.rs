//! Hospital Insights: a desktop dashboard over a static table of hospital
//! records.
//!
//! [`data`] holds the load-once dataset and every statistic and query the
//! pages show; [`app`], [`state`] and [`ui`] render it with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;

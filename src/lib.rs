//! Launch Dash - SpaceX launch records dashboard
//!
//! Loads a launch records CSV once, serves a page with a site dropdown and a
//! payload range slider, and redraws a pie and a scatter chart whenever a
//! control changes.

pub mod charts;
pub mod config;
pub mod dash;
pub mod data;
pub mod web;

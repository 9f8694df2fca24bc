#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

mod frb_generated; /* AUTO INJECTED BY flutter_rust_bridge. This line may not be accurate, and you can change it according to your needs. */

pub mod api;
pub mod config;
pub mod geocoder;
pub mod location_tracker;
pub mod logs;
pub mod navigator;
pub mod renderer;
pub mod route_coordinator;
pub mod router;
pub mod utils;

//! GeoTrack Core Library
//!
//! Clients for cell-tower and Wi-Fi geolocation services:
//! - One `Locator` interface over the standard (Mozilla, Google) and Yandex request formats
//! - HTTP status to error mapping
//! - Configuration loading for the CLI

pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::{
    CellTower, ClientError, ClientResult, Dialect, Fallbacks, LocateRequest, LocateResponse,
    Location, Locator, LocatorFactory, LocatorSettings, UnifiedLocator, WifiAccessPoint, GOOGLE,
    MOZILLA, YANDEX,
};
pub use config::model::{Config, GlobalSettings, Provider};

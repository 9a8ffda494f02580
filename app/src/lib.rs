//! # Cinema App
//!
//! The cinema booking client: four pages driven by one [`app::AppReducer`].
//!
//! - **Show listing** (`/`): every show with its availability
//! - **Booking** (`/booking/:showId`): seat grid, customer details, submission
//! - **Confirmation** (`/booking-success/:bookingId`): the persisted booking
//! - **Admin** (`/admin`): create movies and shows
//!
//! Navigating replaces the page state and advances the view generation;
//! responses issued under an older generation are dropped.

pub mod app;
pub mod command;
pub mod config;
pub mod environment;
pub mod features;
pub mod format;
pub mod route;
pub mod telemetry;
pub mod view;

pub use app::{AppAction, AppReducer, AppState, Page};
pub use config::{Cli, Config, ConfigError};
pub use environment::AppEnvironment;
pub use route::Route;

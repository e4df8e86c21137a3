//! API Routes
//!
//! Route handlers organized by functionality.

pub mod applications;
pub mod dashboard;
pub mod health;
pub mod navigation;
pub mod preferences;
pub mod session;
pub mod studies;

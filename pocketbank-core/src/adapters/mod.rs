//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Demo data provider for AccountDataProvider
//! - Terminal bell, no-op and recording implementations of HapticFeedback

pub mod demo;
pub mod haptics;

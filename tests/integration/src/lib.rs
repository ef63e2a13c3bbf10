//! Cross-crate scenario tests for the PitWatch dashboard
//!
//! This test suite validates:
//! - Filtering and mutation flows over the seeded stores
//! - Notification lifecycle end to end
//! - Prediction submission against a stub backend, including the probe
//! - Session sign-in, restart durability and route gating

pub mod test_utils;

#[cfg(test)]
mod dashboard_scenarios;

#[cfg(test)]
mod prediction_scenarios;

#[cfg(test)]
mod session_scenarios;

//! Ticklist library exports for testing

pub mod core;
pub mod term;

#[cfg(test)]
pub mod test_support;

// Shared infrastructure for the slugline workspace: configuration loading and
// the memoization cache that sits in front of the data providers.

pub mod cache;
pub mod config;

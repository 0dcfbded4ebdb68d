// Baseball domain crate: plate-appearance classification, per-game
// aggregation, hit-rate trends, next-game prediction, and the provider
// clients that fetch the raw data.

pub mod player;
pub mod provider;
pub mod stats;

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod food_matcher;
pub mod food_types;
pub mod intake;
pub mod intake_aggregator;
pub mod nutrition_scaler;
pub mod phrase_segmenter;
pub mod profile;
pub mod report;
pub mod search;

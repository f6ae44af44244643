pub mod data_loader;
pub mod fuzzy_engine;

pub use data_loader::{load_food_table, read_food_table};
pub use fuzzy_engine::{weighted_ratio, FuzzyEngine};

pub mod batch;
pub mod config;
pub mod error;
pub mod measurement;
pub mod path_utils;
pub mod units;

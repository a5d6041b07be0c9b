pub mod aggregate;
pub mod bench;
pub mod discover;
pub mod display;
pub mod errors;
pub mod invoke;
pub mod parse;
pub mod report;
pub mod stats;
pub mod types;

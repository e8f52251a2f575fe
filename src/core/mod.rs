pub mod errors;
pub mod interfaces;
pub mod models;
pub mod orchestrators;
pub mod pattern_extractor;

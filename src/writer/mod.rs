//! Component 3 – output writers.
pub mod json;

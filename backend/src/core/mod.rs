//! Core utilities shared by every engine component

pub mod validation;

pub use validation::ValidationError;

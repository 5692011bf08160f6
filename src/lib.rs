pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod parse;
pub mod reference;
pub mod reporter;
pub mod rules;
pub mod walk;

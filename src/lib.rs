//! Synthetic two-class conversation generator and leakage-free splitter for
//! the DeepSea relationship-boundary classifier.

pub mod audit;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod phrases;
pub mod sample;
pub mod slots;
pub mod splitter;
pub mod templates;
pub mod transform;

pub use context::GenContext;
pub use error::{DatagenError, Result};
pub use generator::Generator;
pub use sample::{Difficulty, GeneratedSample, Label};

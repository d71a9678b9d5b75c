pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{storage::LocalStorage, CliConfig};
pub use crate::core::{etl::EtlEngine, pipeline::ExtractionPipeline};
pub use crate::utils::error::{ExtractError, Result};

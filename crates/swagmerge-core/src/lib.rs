pub mod build;
pub mod config;
pub mod emit;
pub mod error;
pub mod parse;
pub mod transform;
pub mod update;

pub use build::{CommandBuilder, SkipBuild, SpecBuilder};
pub use update::{UpdateOptions, UpdateReport, build_and_update, patch_docs, update_docs};

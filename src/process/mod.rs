//! File processing pipeline.

pub mod pipeline;

pub use pipeline::strip_file;

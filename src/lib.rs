//! Schema-to-type resolution and identifier normalization for API stub
//! generation.
//!
//! The core is a pure library: feed it a parsed schema [`Document`] and a
//! [`CodegenConfig`], get back renderer-ready descriptors with valid,
//! collision-free names and target type strings. Template rendering and
//! file emission live outside this crate.

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod enums;
pub mod generate;
pub mod naming;
pub mod path_de;
pub mod postprocess;
pub mod resolve;
pub mod schema;

pub use config::CodegenConfig;
pub use descriptor::GeneratedOutput;
pub use generate::Generator;
pub use schema::{parse_document, Document};

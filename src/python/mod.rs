//! Python interpreter and package probing.
//!
//! # Modules
//!
//! - [`interpreter`] - Locating the target interpreter and querying its version and prefixes
//! - [`packages`] - Required package list and import probes
//! - [`source`] - Compiling project sources with the interpreter

pub mod interpreter;
pub mod packages;
pub mod source;

pub use interpreter::{locate_interpreter, probe_interpreter, InterpreterInfo};
pub use packages::{
    default_packages, InterpreterPackageProbe, PackageProbe, PackageSpec, ProbeOutcome,
};
pub use source::compile_sources;

//! Test support for the crimson-forest workspace.

pub mod fuzzer;

pub use fuzzer::Fuzzer;

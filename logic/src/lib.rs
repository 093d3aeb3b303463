pub mod adapter;
pub mod archive_builder;
pub mod arguments;
pub mod assembler;
pub mod chimera;
pub mod configuration;
pub mod help;
#[cfg(test)]
mod mock_adapter;
pub mod runner;
pub mod temp_file_guard;
pub mod types;
pub mod validation;
pub mod version;

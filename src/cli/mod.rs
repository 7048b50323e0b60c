pub mod cli;
pub mod filesystem;

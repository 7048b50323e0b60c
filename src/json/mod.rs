pub mod decoder;
pub mod grammar;
pub mod parser;
pub mod value;

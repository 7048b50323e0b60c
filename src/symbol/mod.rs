pub mod symbol;
pub mod symbol_node;
pub mod symbol_table;

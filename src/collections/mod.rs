pub mod hash_table;
pub mod shared;

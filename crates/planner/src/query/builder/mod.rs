pub mod filter;
pub mod insert;

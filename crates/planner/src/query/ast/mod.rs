pub mod expr;
pub mod filter;
pub mod insert;

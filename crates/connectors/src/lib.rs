pub mod settings;
pub mod sql;

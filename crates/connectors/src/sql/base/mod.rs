pub mod accessor;
pub mod environment;
pub mod error;
pub mod metadata;

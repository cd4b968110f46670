pub mod direction;
pub mod host_type;
pub mod identifiers;
pub mod value;

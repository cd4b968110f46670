pub mod accessors;
pub mod coercion;
pub mod connection;
pub mod data_type;
pub mod environment;
pub mod metadata;
pub mod params;
pub mod row;
pub mod utils;

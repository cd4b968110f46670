pub mod qualifier;
pub mod row;

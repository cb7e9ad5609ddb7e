pub mod motion;
pub mod query;

pub mod migrate;
pub mod plan;

pub mod health;
pub mod initialize;
pub mod items;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;

pub mod engine;
pub mod models;

pub use engine::SettlementFilter;
pub use models::FilterResult;

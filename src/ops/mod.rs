pub mod append;
pub mod extract;
pub mod filter;
pub mod query;

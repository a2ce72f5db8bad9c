pub mod config;
pub mod corpus;
pub mod error;
pub mod fetch;
pub mod types;

pub mod config;
pub mod corpus;
pub mod models;
pub mod rag;
pub mod server;

pub mod embed;
pub mod error;
pub mod graph;
pub mod lang;
pub mod parse;
pub mod store;

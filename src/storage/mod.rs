pub mod catalog;
pub mod error;
pub mod resolver;
pub mod source;

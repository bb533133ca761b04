//! Local persistence layer (session credential file).

pub mod token_file;

pub use token_file::TokenStore;

pub mod authorization;
pub mod classify;
pub mod datamodel;
pub mod error;
pub mod keys;
pub mod keywords;
pub mod mapping;
pub mod propagate;
pub mod table;
pub mod types;
pub mod vocabulary;

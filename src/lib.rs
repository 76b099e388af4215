pub mod api;
pub mod catalog;
pub mod config;
pub mod lookup;
pub mod search;

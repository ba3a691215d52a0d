pub mod cli;
pub mod config;
pub mod logging;
pub mod registry;
pub mod search;
pub mod store;
pub mod view;

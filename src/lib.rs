pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod scanner;
pub mod session;
pub mod shutdown;
pub mod ui;
pub mod worker;

//! Command implementations for the ndareview CLI

mod analyze;
mod setup;

pub use analyze::execute_analyze_command;
pub use setup::execute_setup_store_command;

//! Terminal front-end. Maps prompts and menu picks onto [`crate::wizard::Wizard`]
//! actions; all rules live in the wizard itself.

pub mod io;
pub mod output;
mod shell;

pub use shell::run_cli;

//! Command-line interface module
//!
//! Argument parsing lives in [`args`]; each subcommand has a `handle_*_command`
//! in its own module. Handlers print results to stdout and return errors to
//! `main`, which reports them on stderr.

pub mod args;
pub mod display;
pub mod doctor;
pub mod init;
pub mod list;
pub mod run;
pub mod status;
pub mod thoughts;

pub use args::{Cli, Commands, RunArgs};
pub use doctor::handle_doctor_command;
pub use init::handle_init_command;
pub use list::handle_list_command;
pub use run::handle_run_command;
pub use status::handle_status_command;
pub use thoughts::handle_thoughts_command;

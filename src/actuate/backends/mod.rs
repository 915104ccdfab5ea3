pub mod command;
pub mod dry_run;

pub use command::{CommandControl, CommandTemplate, DEFAULT_COMMAND_TIMEOUT};
pub use dry_run::DryRunControl;

//! One module per subcommand, each exposing an `execute` function.

pub mod completions;
pub mod delete;
pub mod generate_cmd;
pub mod get;
pub mod list;
pub mod register;
pub mod set;

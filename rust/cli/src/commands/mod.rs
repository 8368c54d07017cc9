//! Command handlers, one module per subcommand.
//!
//! Each handler takes its output streams as `&mut dyn Write` (and `play` its
//! input as `&mut dyn BufRead`) and returns `Result<(), CliError>`.

mod cfg;
mod play;
mod shuffle;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use shuffle::handle_shuffle_command;

mod handlers;
mod parser;

pub use handlers::handle_command;
pub use parser::{Command, USAGE, parse_command};

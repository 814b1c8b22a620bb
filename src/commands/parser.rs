use crate::error::LiteboxError;

pub const USAGE: &str = "\
Usage: litebox <command> [args]

Commands:
  ls                        print the storage tree as JSON
  mkdir <path>              create a folder (and missing parents)
  put <local-file> [folder] upload a local file into a folder (default: root)
  get <path> [local-out]    download a file to local-out, or to stdout
  rm <path>                 delete a file or a whole folder
  help                      show this message

Configuration is read from ./config.toml and LITEBOX_* environment variables.";

// Command enum to represent store commands
#[derive(Debug, PartialEq)]
pub enum Command {
    List,
    Mkdir(String),
    Put { source: String, folder: String },
    Get { path: String, output: Option<String> },
    Remove(String),
    Help,
}

// Parse command-line arguments (without the program name) into a Command
pub fn parse_command(args: &[String]) -> Result<Command, LiteboxError> {
    let Some((cmd, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    let arg = |i: usize| rest.get(i).map(|s| s.to_string());

    let command = match cmd.to_ascii_lowercase().as_str() {
        "ls" | "list" => Command::List,
        "mkdir" => Command::Mkdir(required(arg(0), "mkdir", "<path>")?),
        "put" | "upload" => Command::Put {
            source: required(arg(0), "put", "<local-file>")?,
            folder: arg(1).unwrap_or_default(),
        },
        "get" | "download" => Command::Get {
            path: required(arg(0), "get", "<path>")?,
            output: arg(1),
        },
        "rm" | "delete" => Command::Remove(required(arg(0), "rm", "<path>")?),
        "help" | "-h" | "--help" => Command::Help,
        other => {
            return Err(LiteboxError::Usage(format!("unknown command '{}'", other)));
        }
    };

    Ok(command)
}

fn required(value: Option<String>, cmd: &str, name: &str) -> Result<String, LiteboxError> {
    value.ok_or_else(|| LiteboxError::Usage(format!("{} requires {}", cmd, name)))
}

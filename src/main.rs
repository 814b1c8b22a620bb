//! LiteBox - Entry Point
//!
//! Command-line front end for the LiteBox personal storage store.

use env_logger::Env;
use log::debug;

use litebox::commands::{Command, USAGE, handle_command, parse_command};
use litebox::error::handlers::{EXIT_OK, error_to_exit_code, handle_error};
use litebox::{LiteboxError, Store, StoreConfig};

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter; logs go to stderr
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let code = match run().await {
        Ok(()) => EXIT_OK,
        Err(e) => {
            handle_error(&e);
            if let LiteboxError::Usage(_) = e {
                eprintln!("{}", USAGE);
            }
            error_to_exit_code(&e)
        }
    };

    std::process::exit(code);
}

async fn run() -> Result<(), LiteboxError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;

    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = StoreConfig::load()?;
    debug!("Loaded configuration: {:?}", config);

    let store = Store::open(config.storage_root_path())
        .await?
        .with_listing_options(config.listing_options());

    let mut stdout = tokio::io::stdout();
    handle_command(&store, command, &mut stdout).await
}

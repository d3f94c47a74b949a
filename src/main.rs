use clap::Parser;
use std::error::Error;
use subnet_wizard::cli::{self, Args};
use subnet_wizard::config::{self, Config};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = config::init_logging() {
        eprintln!("Error initializing log4rs: {e}");
    }
    log::info!("#Start main()");

    let args = Args::parse();
    let config = Config::from_args(args)?;

    // run() has already printed the reason
    if let Err(e) = cli::run(&config) {
        log::error!("run() failed: {e}");
        std::process::exit(1);
    }
    Ok(())
}

use std::process;

use clap::{error::ErrorKind, Parser};
use log::{error, info};
use road_astar::{
    cli::{run, Args},
    error::Error,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(Error::Config(e.to_string()).exit_code());
        }
    };

    match run(&args) {
        Ok(output) => info!("wrote {}", output.display()),
        Err(e) => {
            error!("{}", e);
            process::exit(e.exit_code());
        }
    }
}

use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod http;
pub mod playlist;
mod public_endpoint;
pub mod storage;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

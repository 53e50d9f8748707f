#![allow(dead_code)]
#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

extern crate nalgebra_glm as glm;

mod config;
mod controls;
mod error;
mod grender;
mod mesh;
mod model;
mod morph;
mod params;

use config::Config;
use error::ViewerError;

fn load_config() -> Result<Config, ViewerError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = load_config().and_then(grender::run) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

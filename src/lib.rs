#[macro_use]
extern crate log;

pub mod blockfrost;
pub mod config;
pub mod rest;
pub mod service;
pub mod utils;

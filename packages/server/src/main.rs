#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for justice graph backlog estimates.
//!
//! Configuration comes from `JUSTICE_GRAPH_DATA_PATH`, `BIND_ADDR`, and
//! `PORT`; see [`justice_graph_server::ServerConfig::from_env`].

use justice_graph_server::{ServerConfig, run_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    run_server(ServerConfig::from_env()).await
}

//! Database integration tests

mod entries;
mod migrations;
mod workspace_servers;

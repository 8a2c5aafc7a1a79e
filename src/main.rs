//! Folio Frontend Entry Point

mod access;
mod app;
mod commands;
mod components;
mod config;
mod error;
mod format;
mod forms;
mod listing;
mod markdown;
mod models;
mod pages;
mod routes;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(App);
}

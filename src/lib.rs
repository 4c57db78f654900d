pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod response;
pub mod services;
pub mod state;
pub mod web;

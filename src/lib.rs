pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod services;
pub mod state;
pub mod view_model;
pub mod views;

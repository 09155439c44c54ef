pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod notice;
pub mod queries;
pub mod routes;
pub mod types;
pub mod views;

pub mod controller;
pub mod infra;
pub mod routes;
pub mod state;

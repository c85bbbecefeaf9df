pub mod campaign;
pub mod groups;
pub mod health;
pub mod session;

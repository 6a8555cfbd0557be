pub mod action;
pub mod flow;
pub mod health;
pub mod locale;
pub mod server;

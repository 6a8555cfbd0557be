pub mod action;
pub mod common;
pub mod flow;
pub mod locale;
pub mod schema;

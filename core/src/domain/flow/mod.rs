pub mod entities;
pub mod ports;
pub mod registry;
pub mod services;
pub mod template;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;

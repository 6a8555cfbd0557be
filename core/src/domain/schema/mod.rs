pub mod definition;
pub mod entities;
pub mod value_objects;

pub use definition::*;
pub use entities::*;
pub use value_objects::*;

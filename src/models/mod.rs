// Module exports for models

pub mod category;
pub mod goal;
pub mod settings;
pub mod slot;

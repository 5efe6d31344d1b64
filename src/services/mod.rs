// Service module exports

pub mod category;
pub mod database;
pub mod goal;
pub mod settings;
pub mod slot;

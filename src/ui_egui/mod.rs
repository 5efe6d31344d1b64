mod app;
pub mod interaction;
mod views;

pub use app::SlotLogApp;

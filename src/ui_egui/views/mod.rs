//! Views drawn by the app shell. Each view takes the interaction engines
//! it drives by reference; none of them own state across frames.

pub mod category_list;
pub mod editor_panel;
mod palette;
pub mod planning;
pub mod slot_grid;

// Property-based tests for the slot-grid interaction engine

mod fixtures;
mod property;

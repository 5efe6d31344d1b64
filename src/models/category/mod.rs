//! Category model for classifying time slots.
//!
//! Categories carry a display color and a manual sort order. The position of
//! a category in the sorted active list also decides its keyboard shortcut.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed swatches offered by the color picker and used for the default set.
pub const CATEGORY_PALETTE: [&str; 13] = [
    "#2D5F3E", // deep forest green
    "#6B8F71", // sage green
    "#A67B5B", // warm brown
    "#C4A77D", // sand/tan
    "#8B6F47", // dark tan
    "#7A8B99", // cool slate
    "#B8860B", // dark goldenrod
    "#8FBC8F", // dark sea green
    "#CD853F", // peru/terracotta
    "#708090", // slate gray
    "#556B2F", // dark olive green
    "#BC8F8F", // rosy brown
    "#9DB4C0", // pewter blue
];

/// A category that time slots can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    /// Display name of the category
    pub name: String,
    /// Hex color code for the category (e.g., "#2D5F3E")
    pub color: String,
    /// Position in the user's manual ordering
    pub sort_order: i64,
    /// Archived categories are hidden from pickers but keep their slots
    pub is_archived: bool,
}

impl Category {
    /// Create a new, unsaved category at the given position.
    pub fn new(name: impl Into<String>, color: impl Into<String>, sort_order: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: color.into(),
            sort_order,
            is_archived: false,
        }
    }

    /// Validate the category data.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong);
        }
        if !is_valid_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor);
        }
        Ok(())
    }
}

/// Validation errors for Category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name must be 50 characters or less")]
    NameTooLong,
    #[error("Invalid color format (use hex like #FF0000)")]
    InvalidColor,
}

/// Check if a string is a valid hex color code.
pub fn is_valid_hex_color(color: &str) -> bool {
    let Some(hex) = color.trim().strip_prefix('#') else {
        return false;
    };
    // Accept 3, 6, or 8 character hex codes
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Default categories created on first run, in sort order.
pub fn default_categories() -> Vec<Category> {
    let seed: [(&str, usize); 13] = [
        ("Sleep", 7),
        ("Deep Work", 0),
        ("Meetings", 5),
        ("Admin/Email", 9),
        ("Relationship", 11),
        ("Exercise", 1),
        ("Meals/Cooking", 6),
        ("Commute", 4),
        ("Social", 3),
        ("Leisure/Screen Time", 12),
        ("Reading", 10),
        ("Personal Development", 2),
        ("Errands", 8),
    ];

    seed.iter()
        .enumerate()
        .map(|(i, (name, swatch))| Category::new(*name, CATEGORY_PALETTE[*swatch], i as i64))
        .collect()
}

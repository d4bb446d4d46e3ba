//! Element ids and the block heights of the headless layout, in CSS pixels.

pub const HERO_ID: &str = "home";
pub const ACHIEVEMENTS_ID: &str = "achievements";
pub const FOOTER_ID: &str = "footer";
pub const DETAIL_ID: &str = "project-detail";
pub const NOT_FOUND_ID: &str = "not-found";

pub const ABOUT_HEIGHT: f64 = 720.0;
pub const EXPERTISE_HEIGHT: f64 = 840.0;
pub const EDUCATION_HEIGHT: f64 = 760.0;
pub const CONTACT_HEIGHT: f64 = 900.0;
pub const FOOTER_HEIGHT: f64 = 320.0;

/// Heading and padding of a card grid section.
pub const GRID_CHROME_HEIGHT: f64 = 260.0;
pub const GRID_COLUMNS: usize = 2;
pub const PROJECT_ROW_HEIGHT: f64 = 520.0;
pub const ACHIEVEMENT_ROW_HEIGHT: f64 = 560.0;

pub const DETAIL_BASE_HEIGHT: f64 = 1400.0;
pub const DETAIL_ITEM_HEIGHT: f64 = 120.0;

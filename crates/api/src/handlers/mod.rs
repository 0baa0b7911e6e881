pub mod fan_art;
pub mod featured_work;
pub mod profile;

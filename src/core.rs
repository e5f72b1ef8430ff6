pub mod display;
pub mod record;
pub mod standings;
pub mod templates;

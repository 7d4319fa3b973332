mod add_mode;
mod classify_mode;
mod editor_utils;
mod history_mode;

pub use add_mode::add_mode;
pub use classify_mode::classify_mode;
pub use history_mode::history_mode;

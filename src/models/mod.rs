pub mod category;
pub mod event;
pub mod image;
pub mod settings;
pub mod user;

pub use category::{EventCategory, default_categories};
pub use event::Event;
pub use image::EventImage;
pub use settings::{NotificationPreferences, Theme, UserSettings};
pub use user::{ADMIN_ROLE, DEFAULT_ROLE, User};

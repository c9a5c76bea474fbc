pub mod password;
pub mod uniqueness;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthService, ProfileUpdate, Registration, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod event_service;
pub mod event_service_impl;
pub use event_service::{EventChanges, EventService, NewEvent};
pub use event_service_impl::SeaOrmEventService;

pub mod category_service;
pub mod category_service_impl;
pub use category_service::{CategoryChanges, CategoryService};
pub use category_service_impl::SeaOrmCategoryService;

pub mod image_service;
pub mod image_service_impl;
pub use image_service::{ImageChanges, ImageService, NewImage};
pub use image_service_impl::SeaOrmImageService;

pub mod settings_service;
pub mod settings_service_impl;
pub use settings_service::{SettingsChanges, SettingsService};
pub use settings_service_impl::SeaOrmSettingsService;

//! Bilingual (Spanish/English) restaurant profile pages rendered from a JSON
//! document fetched by slug.

pub mod config;
pub mod data;
pub mod lang;
pub mod page;
pub mod renderer;
pub mod source;
pub mod view;

pub use data::RestaurantProfile;
pub use lang::{get_language_value, Language, LocalizedText};
pub use page::{MemoryPage, Mount, MountPoint};
pub use renderer::{init, ProfileRenderer};
pub use source::{resolve_slug, RestaurantSource};
pub use view::PageView;

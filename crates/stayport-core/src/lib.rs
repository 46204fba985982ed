//! Stayport Core Library
//!
//! Domain models, review-status normalization, the room-type summary codec,
//! form/draft types, validation, and configuration shared across all
//! stayport crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::AppError;
pub use form::{Attachment, Draft, HotelForm, RoomRow};
pub use models::hotel::{Hotel, PageMeta};
pub use models::payload::HotelPayload;
pub use models::room_type::{Breakfast, RoomType};
pub use models::status::ReviewStatus;

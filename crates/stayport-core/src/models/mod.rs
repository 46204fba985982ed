pub mod hotel;
pub mod payload;
pub mod room_type;
pub mod status;

pub use hotel::{Hotel, PageMeta};
pub use payload::HotelPayload;
pub use room_type::{Breakfast, RoomType};
pub use status::ReviewStatus;

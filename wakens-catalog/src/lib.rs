pub mod hotel;
pub mod metrics;
pub mod review;
pub mod room;

pub use hotel::{eco_picks, find_hotel, hotels, search_by_location, Hotel};
pub use metrics::{find_metric, RoomMetric};
pub use review::{reviews_for_hotel, HotelReviews, Review};
pub use room::{find_room, rooms, rooms_for_hotel, Room};

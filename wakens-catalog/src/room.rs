use serde::{Deserialize, Serialize};

/// A bookable room. Immutable reference data; `hotel_id` points into the
/// hotel catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub hotel_id: String,
    pub name: String,
    pub size: String,
    pub beds: String,
    pub price: i64,
    pub image: String,
}

fn room(id: &str, hotel_id: &str, name: &str, size: &str, beds: &str, price: i64, image: &str) -> Room {
    Room {
        id: id.to_string(),
        hotel_id: hotel_id.to_string(),
        name: name.to_string(),
        size: size.to_string(),
        beds: beds.to_string(),
        price,
        image: image.to_string(),
    }
}

pub fn rooms() -> Vec<Room> {
    vec![
        room("r1", "h1", "Kongu TBI", "320 sq ft", "1 Queen", 1800, "/images/rooms/kongu-tbi.jpg"),
        room("r2", "h2", "Riverfront Suite", "450 sq ft", "1 King", 2200, "/images/rooms/riverfront.jpg"),
        room("r3", "h1", "Garden Deluxe", "380 sq ft", "2 Twin", 2100, "/images/rooms/garden.jpg"),
        room("r4", "h2", "Courtyard Twin", "340 sq ft", "2 Twin", 1900, "/images/rooms/courtyard.jpg"),
        room("r5", "h3", "Weaver's Loft", "300 sq ft", "1 Queen", 1500, "/images/rooms/weavers.jpg"),
        room("r6", "h4", "Hillside King", "420 sq ft", "1 King", 2600, "/images/rooms/hillside.jpg"),
    ]
}

pub fn find_room(id: &str) -> Option<Room> {
    rooms().into_iter().find(|r| r.id == id)
}

pub fn rooms_for_hotel(hotel_id: &str) -> Vec<Room> {
    rooms().into_iter().filter(|r| r.hotel_id == hotel_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::find_hotel;

    #[test]
    fn every_room_points_at_a_hotel() {
        for r in rooms() {
            assert!(find_hotel(&r.hotel_id).is_some(), "dangling hotel_id on {}", r.id);
        }
    }

    #[test]
    fn rooms_group_by_hotel() {
        let h1_rooms = rooms_for_hotel("h1");
        assert_eq!(h1_rooms.len(), 2);
        assert!(h1_rooms.iter().all(|r| r.hotel_id == "h1"));
        assert!(rooms_for_hotel("h99").is_empty());
    }
}

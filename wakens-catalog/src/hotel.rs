use serde::{Deserialize, Serialize};

/// A property in the catalog. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub price: i64,
    pub eco_score: i64,
    pub air_quality: i64,
    pub description: String,
    pub facilities: Vec<String>,
    pub image: String,
}

fn hotel(
    id: &str,
    name: &str,
    location: &str,
    rating: f64,
    price: i64,
    eco_score: i64,
    air_quality: i64,
    description: &str,
    facilities: &[&str],
    image: &str,
) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        rating,
        price,
        eco_score,
        air_quality,
        description: description.to_string(),
        facilities: facilities.iter().map(|f| f.to_string()).collect(),
        image: image.to_string(),
    }
}

/// The full catalog. Seeded in code, same records the demo data ships with.
pub fn hotels() -> Vec<Hotel> {
    vec![
        hotel(
            "h1",
            "Kongu Engineering College",
            "Perundurai, Erode",
            4.6,
            1800,
            92,
            88,
            "Campus guest stays with solar power, live air monitoring and quiet tree-lined courtyards.",
            &["Live air quality monitoring", "Solar power", "Filtered water", "Free WiFi"],
            "/images/hotels/kongu.jpg",
        ),
        hotel(
            "h2",
            "Thrisha Residence",
            "Karungalpalayam, Erode",
            4.4,
            2200,
            89,
            86,
            "Riverfront rooms with rainwater harvesting and smart climate automation.",
            &["Rainwater harvesting", "Smart automation", "Riverside terrace", "Restaurant"],
            "/images/hotels/thrisha.jpg",
        ),
        hotel(
            "h3",
            "Cauvery View Inn",
            "Pallipalayam, Erode",
            4.1,
            1500,
            78,
            81,
            "Budget rooms close to the handloom quarter, simple and clean.",
            &["Free WiFi", "Parking", "24h front desk"],
            "/images/hotels/cauvery.jpg",
        ),
        hotel(
            "h4",
            "Thindal Hillside Stay",
            "Thindal, Erode",
            4.3,
            2600,
            90,
            84,
            "Hillside cottages above the temple road with composting gardens.",
            &["Composting gardens", "Hill walks", "Organic kitchen", "EV charging"],
            "/images/hotels/thindal.jpg",
        ),
    ]
}

pub fn find_hotel(id: &str) -> Option<Hotel> {
    hotels().into_iter().find(|h| h.id == id)
}

/// Case-insensitive substring match on the location field.
pub fn search_by_location(location: &str) -> Vec<Hotel> {
    let needle = location.to_lowercase();
    hotels()
        .into_iter()
        .filter(|h| h.location.to_lowercase().contains(&needle))
        .collect()
}

/// Top sustainable picks: high eco score and air quality, best combined
/// score first.
pub fn eco_picks() -> Vec<Hotel> {
    let mut picks: Vec<Hotel> = hotels()
        .into_iter()
        .filter(|h| h.eco_score >= 88 && h.air_quality >= 85)
        .collect();
    picks.sort_by_key(|h| -(h.eco_score + h.air_quality));
    picks
}

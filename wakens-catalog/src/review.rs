use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A guest review. `is_fake` marks entries flagged by moderation; they stay
/// visible but are counted separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: f64,
    pub date: NaiveDate,
    pub comment: String,
    pub is_fake: bool,
    pub helpful: i64,
}

/// Reviews grouped per hotel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelReviews {
    pub hotel_id: String,
    pub reviews: Vec<Review>,
}

impl HotelReviews {
    /// Newest first.
    pub fn sorted_recent(&self) -> Vec<Review> {
        let mut sorted = self.reviews.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Most helpful first.
    pub fn sorted_helpful(&self) -> Vec<Review> {
        let mut sorted = self.reviews.clone();
        sorted.sort_by(|a, b| b.helpful.cmp(&a.helpful));
        sorted
    }

    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        self.reviews.iter().map(|r| r.rating).sum::<f64>() / self.reviews.len() as f64
    }

    pub fn fake_count(&self) -> usize {
        self.reviews.iter().filter(|r| r.is_fake).count()
    }
}

fn review(
    id: &str,
    user_name: &str,
    rating: f64,
    date: (i32, u32, u32),
    comment: &str,
    is_fake: bool,
    helpful: i64,
) -> Review {
    Review {
        id: id.to_string(),
        user_name: user_name.to_string(),
        user_avatar: format!("/images/avatars/{}.jpg", id),
        rating,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("static review date"),
        comment: comment.to_string(),
        is_fake,
        helpful,
    }
}

fn all_reviews() -> Vec<HotelReviews> {
    vec![
        HotelReviews {
            hotel_id: "h1".to_string(),
            reviews: vec![
                review("rv1", "Meena R", 4.8, (2025, 9, 14), "Air genuinely felt cleaner, the live metrics page is a great touch.", false, 12),
                review("rv2", "Arjun S", 4.5, (2025, 8, 2), "Quiet campus stay, solar-heated water worked fine.", false, 7),
                review("rv3", "travel_deals_99", 5.0, (2025, 10, 1), "Best hotel ever!!! Amazing!!!", true, 0),
            ],
        },
        HotelReviews {
            hotel_id: "h2".to_string(),
            reviews: vec![
                review("rv4", "Priya Sharma", 4.6, (2025, 10, 20), "Riverfront suite is worth it, ask for the upper floor.", false, 9),
                review("rv5", "Karthik V", 4.0, (2025, 7, 11), "Good food, slightly slow check-in.", false, 4),
            ],
        },
        HotelReviews {
            hotel_id: "h3".to_string(),
            reviews: vec![
                review("rv6", "Devi L", 3.9, (2025, 6, 5), "Simple and clean, great value near the handloom shops.", false, 3),
            ],
        },
        HotelReviews {
            hotel_id: "h4".to_string(),
            reviews: vec![
                review("rv7", "Suresh P", 4.4, (2025, 9, 28), "Cottages are lovely at sunrise, paths get slippery after rain.", false, 6),
            ],
        },
    ]
}

pub fn reviews_for_hotel(hotel_id: &str) -> Option<HotelReviews> {
    all_reviews().into_iter().find(|r| r.hotel_id == hotel_id)
}

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::Review;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dietary: Vec<String>,
    pub rating: f64,
    pub location: String,
    pub address: String,
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Restaurant fields as accepted on creation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub cuisine: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "one_or_many")]
    pub dietary: Vec<String>,
    pub rating: f64,
    pub location: String,
    pub address: String,
    pub contact: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// Accept `"Vegan"` as well as `["Vegan"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Tags::deserialize(deserializer)? {
        Tags::One(tag) => vec![tag],
        Tags::Many(tags) => tags,
    })
}

impl NewRestaurant {
    pub fn into_restaurant(self, id: Uuid) -> Restaurant {
        Restaurant {
            id,
            name: self.name,
            cuisine: self.cuisine,
            kind: self.kind,
            dietary: self.dietary,
            rating: self.rating,
            location: self.location,
            address: self.address,
            contact: self.contact,
            website: self.website,
        }
    }
}

/// A restaurant together with every review that references it.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub reviews: Vec<Review>,
}

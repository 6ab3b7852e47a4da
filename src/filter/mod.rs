pub mod filter_where;

use serde::Deserialize;

use crate::database::models::Restaurant;

pub use filter_where::FilterWhere;

/// Optional case-insensitive substring conditions over restaurants.
///
/// Present conditions are ANDed together; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RestaurantFilter {
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub location: Option<String>,
}

impl RestaurantFilter {
    pub fn by_cuisine(cuisine: impl Into<String>) -> Self {
        Self { cuisine: Some(cuisine.into()), ..Default::default() }.normalized()
    }

    pub fn by_diet(diet: impl Into<String>) -> Self {
        Self { diet: Some(diet.into()), ..Default::default() }.normalized()
    }

    pub fn by_location(location: impl Into<String>) -> Self {
        Self { location: Some(location.into()), ..Default::default() }.normalized()
    }

    /// Treat blank parameters (`?cuisine=`) as absent.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self {
            cuisine: keep(self.cuisine),
            diet: keep(self.diet),
            location: keep(self.location),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cuisine.is_none() && self.diet.is_none() && self.location.is_none()
    }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let cuisine_ok = self
            .cuisine
            .as_deref()
            .map_or(true, |needle| contains_ci(&restaurant.cuisine, needle));
        let diet_ok = self
            .diet
            .as_deref()
            .map_or(true, |needle| restaurant.dietary.iter().any(|tag| contains_ci(tag, needle)));
        let location_ok = self
            .location
            .as_deref()
            .map_or(true, |needle| contains_ci(&restaurant.location, needle));

        cuisine_ok && diet_ok && location_ok
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn restaurant(cuisine: &str, location: &str, dietary: &[&str]) -> Restaurant {
        Restaurant {
            id: Uuid::new_v4(),
            name: format!("{} in {}", cuisine, location),
            cuisine: cuisine.to_string(),
            kind: "Casual".to_string(),
            dietary: dietary.iter().map(|d| d.to_string()).collect(),
            rating: 4.0,
            location: location.to_string(),
            address: "1 Main St".to_string(),
            contact: "555-0100".to_string(),
            website: None,
        }
    }

    #[test]
    fn test_cuisine_match_is_case_insensitive_substring() {
        let indian = restaurant("Indian", "Leeds", &[]);
        for needle in ["ind", "IND", "Indian", "dia"] {
            assert!(RestaurantFilter::by_cuisine(needle).matches(&indian), "{needle}");
        }
        assert!(!RestaurantFilter::by_cuisine("thai").matches(&indian));
    }

    #[test]
    fn test_conditions_are_conjunctive() {
        let a = restaurant("Italian", "NYC", &[]);
        let b = restaurant("Italian", "LA", &[]);
        let filter = RestaurantFilter {
            cuisine: Some("Italian".to_string()),
            location: Some("NYC".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));
    }

    #[test]
    fn test_diet_matches_any_tag() {
        let r = restaurant("Thai", "Leeds", &["Vegan", "Gluten-Free"]);
        assert!(RestaurantFilter::by_diet("gluten").matches(&r));
        assert!(RestaurantFilter::by_diet("VEG").matches(&r));
        assert!(!RestaurantFilter::by_diet("halal").matches(&r));
        assert!(!RestaurantFilter::by_diet("vegan").matches(&restaurant("Thai", "Leeds", &[])));
    }

    #[test]
    fn test_blank_parameters_impose_nothing() {
        let filter = RestaurantFilter {
            cuisine: Some(String::new()),
            diet: Some("  ".to_string()),
            location: None,
        }
        .normalized();
        assert!(filter.is_empty());
        assert!(filter.matches(&restaurant("Greek", "Athens", &[])));
    }
}

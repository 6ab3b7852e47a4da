pub mod bookmark;
pub mod restaurant;
pub mod review;
pub mod user;

pub use bookmark::Bookmark;
pub use restaurant::{NewRestaurant, Restaurant, RestaurantDetail};
pub use review::Review;
pub use user::{NewUser, User};

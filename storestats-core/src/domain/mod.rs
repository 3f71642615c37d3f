//! Core domain entities
//!
//! Plain data structures supplied by the store plus the distance function.
//! No I/O lives here.

mod cart;
pub mod geo;
mod product;
pub mod result;
mod user;

pub use cart::{Cart, CartItem};
pub use geo::{haversine_distance, GeoPoint, EARTH_RADIUS_METERS};
pub use product::Product;
pub use user::{User, UserName};

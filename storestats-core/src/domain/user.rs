//! User domain model

use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::result::FetchError;

/// A store customer with a home location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: UserName,
    pub location: GeoPoint,
}

/// First and last name as supplied by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    pub firstname: String,
    pub lastname: String,
}

impl User {
    pub fn new(id: u64, name: UserName, location: GeoPoint) -> Self {
        Self { id, name, location }
    }

    /// Reject a location outside the valid degree ranges
    pub fn validate(&self) -> Result<(), FetchError> {
        if !self.location.is_valid() {
            return Err(FetchError::malformed(
                "users",
                format!(
                    "user {} has an out-of-range geolocation ({}, {})",
                    self.id, self.location.latitude, self.location.longitude
                ),
            ));
        }
        Ok(())
    }
}

impl UserName {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

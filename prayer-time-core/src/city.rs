//! City records as returned by the provider's city search.

use serde::{Deserialize, Serialize};

use crate::constants::REGION_GROUP_SEPARATOR;

/// A city known to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub city_code: String,
    pub city_name: String,
    pub country_code: String,
    pub country_name: String,
}

impl CityRecord {
    /// Region groups aggregate several cities and cannot be resolved directly.
    pub fn is_region_group(&self) -> bool {
        self.city_code.contains(REGION_GROUP_SEPARATOR)
    }

    /// Suggested download name for a calendar of this city.
    pub fn ics_filename(&self) -> String {
        format!("{}_{}.ics", self.city_name, self.country_name)
    }
}

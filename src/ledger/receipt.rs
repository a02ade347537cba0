use serde::{Deserialize, Serialize};

/// Latitude/longitude bounds of Switzerland, where every receipt is expected to originate.
pub const LATITUDE_RANGE: (f64, f64) = (45.8, 47.8);
pub const LONGITUDE_RANGE: (f64, f64) = (5.9, 10.5);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn in_bounds(&self) -> bool {
        (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&self.latitude)
            && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&self.longitude)
    }
}

/// Purchase details a transaction may point at through `receiptId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub description: String,
    pub merchant: String,
    pub location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

//! Coffee shop records and the persisted catalog format

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CoffeeShopStyle;

/// Price tiers a shop can be listed under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PriceRange {
    #[serde(rename = "$")]
    Budget,
    #[default]
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
    #[serde(rename = "$$$$")]
    Premium,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Budget,
        PriceRange::Moderate,
        PriceRange::Expensive,
        PriceRange::Premium,
    ];

    /// Symbolic tier as stored, e.g. `$$`
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceRange::Budget => "$",
            PriceRange::Moderate => "$$",
            PriceRange::Expensive => "$$$",
            PriceRange::Premium => "$$$$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::Moderate => "moderate",
            PriceRange::Expensive => "expensive",
            PriceRange::Premium => "premium",
        }
    }

    /// Label shown in the price selector
    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Budget => "$ (Budget)",
            PriceRange::Moderate => "$$ (Moderate)",
            PriceRange::Expensive => "$$$ (Expensive)",
            PriceRange::Premium => "$$$$ (Premium)",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a price tier cannot be recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown price range: {0}")]
pub struct UnknownPriceRange(pub String);

impl FromStr for PriceRange {
    type Err = UnknownPriceRange;

    /// Accepts either the stored symbol or the tier name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PriceRange::ALL
            .into_iter()
            .find(|p| p.symbol() == needle || p.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownPriceRange(s.to_string()))
    }
}

/// A catalog entry that has not been persisted yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeShopDraft {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<CoffeeShopStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
}

impl CoffeeShopDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>, price_range: PriceRange) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            price_range,
            styles: Vec::new(),
            image_urls: Vec::new(),
        }
    }
}

/// A persisted catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeShop {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<CoffeeShopStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(with = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl CoffeeShop {
    /// Promote a draft to a record. The id and timestamp are never changed afterwards.
    pub fn from_draft(draft: CoffeeShopDraft, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            price_range: draft.price_range,
            styles: draft.styles,
            image_urls: draft.image_urls,
            created_at,
        }
    }

    /// Date shown on list cards, e.g. "Jan 15, 2023"
    pub fn added_on(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}

/// Parse a stored timestamp. RFC 3339 and bare `YYYY-MM-DD` dates are accepted.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid timestamp {:?}: {}", raw, e))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("invalid timestamp {:?}", raw))
}

/// Serde adapter for `createdAt`
pub mod created_at {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}

/// Serialize the whole catalog for the storage slot
pub fn encode_catalog(shops: &[CoffeeShop]) -> serde_json::Result<String> {
    serde_json::to_string(shops)
}

/// Parse the storage slot back into records
pub fn decode_catalog(raw: &str) -> serde_json::Result<Vec<CoffeeShop>> {
    serde_json::from_str(raw)
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid calendar date")
}

/// Demo entries used when the storage slot is empty or unreadable
pub fn demo_coffee_shops() -> Vec<CoffeeShop> {
    vec![
        CoffeeShop {
            id: "1".to_string(),
            name: "Minimal Brew".to_string(),
            address: "123 Simplicity Ave, Design District".to_string(),
            price_range: PriceRange::Moderate,
            styles: Vec::new(),
            image_urls: Vec::new(),
            created_at: midnight_utc(2023, 1, 15),
        },
        CoffeeShop {
            id: "2".to_string(),
            name: "Essence Café".to_string(),
            address: "456 Elegance St, Artisan Quarter".to_string(),
            price_range: PriceRange::Expensive,
            styles: Vec::new(),
            image_urls: Vec::new(),
            created_at: midnight_utc(2023, 2, 20),
        },
    ]
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cataloged specimen in the user's collection.
///
/// Plants are created by explicit user action (adding from catalog search or
/// from the collection page) and are never deleted automatically. The `id` is
/// unique and immutable after creation; when the plant comes from the catalog
/// the catalog's species id is carried over, otherwise a time-derived id is
/// assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: i64,
    /// Common name from the catalog.
    pub name: String,
    /// User-facing name. Defaults to `name` at creation.
    pub nickname: String,
    pub scientific_name: String,
    /// Catalog image URL, if any.
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    /// User-supplied photo that overrides the catalog image.
    pub custom_image: Option<String>,
    pub cycle: String,
    pub watering: String,
    pub sunlight: Vec<String>,
    pub care_level: String,
    pub growth_rate: String,
    pub indoor: bool,
    pub poisonous: bool,
    pub edible: bool,
    pub medicinal: bool,
    pub drought_tolerant: bool,
    pub invasive: bool,
    pub tropical: bool,
    pub health: HealthStatus,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
    pub notes: String,
    pub location: String,
    pub pot_size: String,
    pub soil_type: String,
    pub added_date: DateTime<Utc>,
}

/// The user's assessment of a plant's condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

/// Input for adding a plant to the collection.
///
/// Care metadata defaults to empty strings / `false` when the catalog did not
/// supply it; the store fills in nickname, health, location, pot size, soil
/// type, and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlantInput {
    /// Catalog species id to reuse as the plant id. A fresh time-derived id
    /// is assigned when absent.
    pub id: Option<i64>,
    pub name: String,
    pub nickname: Option<String>,
    #[serde(default)]
    pub scientific_name: String,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub cycle: String,
    #[serde(default)]
    pub watering: String,
    #[serde(default)]
    pub sunlight: Vec<String>,
    #[serde(default)]
    pub care_level: String,
    #[serde(default)]
    pub growth_rate: String,
    #[serde(default)]
    pub indoor: bool,
    #[serde(default)]
    pub poisonous: bool,
    #[serde(default)]
    pub edible: bool,
    #[serde(default)]
    pub medicinal: bool,
    #[serde(default)]
    pub drought_tolerant: bool,
    #[serde(default)]
    pub invasive: bool,
    #[serde(default)]
    pub tropical: bool,
}

/// Input for updating a plant. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlantInput {
    pub nickname: Option<String>,
    pub custom_image: Option<String>,
    pub health: Option<HealthStatus>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub pot_size: Option<String>,
    pub soil_type: Option<String>,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
}

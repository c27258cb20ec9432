use serde::{Deserialize, Deserializer, Serialize};

use crate::generator::CareSection;

/// Fields the catalog serves either as a plain string or as a list
/// (scientific name, sunlight).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s.as_str()),
            Self::Many(list) => list.first().map(String::as_str),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(list) => list,
        }
    }
}

impl Default for StringOrList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Boolean flag the catalog serves as `true`/`false`, `0`/`1`, or omits
/// entirely. Anything unrecognized reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let truthy = match value {
            serde_json::Value::Bool(b) => b,
            serde_json::Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
            _ => false,
        };
        Ok(Flag(truthy))
    }
}

/// Image references attached to a catalog species.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub regular_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
}

/// Species record exactly as the catalog serves it. Every field may be
/// missing, null, or loosely typed; "unspecified" is the working assumption.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpecies {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: StringOrList,
    #[serde(default)]
    pub default_image: Option<RawImage>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default)]
    pub watering: Option<String>,
    #[serde(default)]
    pub sunlight: StringOrList,
    #[serde(default)]
    pub care_level: Option<String>,
    #[serde(default)]
    pub growth_rate: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub indoor: Flag,
    #[serde(default)]
    pub poisonous_to_humans: Flag,
    #[serde(default)]
    pub poisonous_to_pets: Flag,
    #[serde(default)]
    pub edible: Flag,
    #[serde(default)]
    pub medicinal: Flag,
    #[serde(default)]
    pub flowers: Flag,
    #[serde(default)]
    pub drought_tolerant: Flag,
    #[serde(default)]
    pub invasive: Flag,
    #[serde(default)]
    pub tropical: Flag,
}

/// Catalog species normalized for consumers: missing, empty, or "Unknown"
/// fields are substituted with documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub id: i64,
    pub name: String,
    pub scientific_name: String,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub cycle: String,
    pub watering: String,
    pub sunlight: Vec<String>,
    pub care_level: String,
    pub growth_rate: String,
    pub description: String,
    pub indoor: bool,
    pub poisonous: bool,
    pub edible: bool,
    pub medicinal: bool,
    pub flowers: bool,
    pub drought_tolerant: bool,
    pub invasive: bool,
    pub tropical: bool,
}

impl SpeciesSummary {
    pub fn from_raw(raw: RawSpecies) -> Self {
        let scientific_name = raw
            .scientific_name
            .first()
            .unwrap_or_default()
            .to_string();

        let name = match raw.common_name {
            Some(n) if !n.is_empty() => n,
            _ if !scientific_name.is_empty() => scientific_name.clone(),
            _ => "Unknown Plant".to_string(),
        };

        let (image, thumbnail) = match raw.default_image {
            Some(img) => (
                img.regular_url.or(img.original_url.clone()),
                img.thumbnail.or(img.original_url),
            ),
            None => (None, None),
        };

        let sunlight: Vec<String> = raw
            .sunlight
            .into_vec()
            .into_iter()
            .filter(|s| !s.is_empty() && s != "Unknown")
            .collect();
        let sunlight = if sunlight.is_empty() {
            vec!["Not specified".to_string()]
        } else {
            sunlight
        };

        Self {
            id: raw.id,
            name,
            scientific_name,
            image,
            thumbnail,
            cycle: care_info(raw.cycle, "Not specified"),
            watering: care_info(raw.watering, "Moderate watering"),
            sunlight,
            care_level: care_info(raw.care_level, "Moderate care"),
            growth_rate: care_info(raw.growth_rate, "Moderate growth"),
            description: raw.description.unwrap_or_default(),
            indoor: raw.indoor.0,
            poisonous: raw.poisonous_to_humans.0 || raw.poisonous_to_pets.0,
            edible: raw.edible.0,
            medicinal: raw.medicinal.0,
            flowers: raw.flowers.0,
            drought_tolerant: raw.drought_tolerant.0,
            invasive: raw.invasive.0,
            tropical: raw.tropical.0,
        }
    }
}

fn care_info(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() && v != "Unknown" => v,
        _ => default.to_string(),
    }
}

/// Paginated catalog envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Default for RawPage<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            current_page: None,
            last_page: None,
            total: None,
        }
    }
}

/// One page of normalized species search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesPage {
    pub species: Vec<SpeciesSummary>,
    pub page: u32,
    pub last_page: u32,
    pub total: u64,
}

/// Care guide as listed / fetched from the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCareGuide {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub section: Vec<CareSection>,
}

/// Care guide for a species, after the two-step list-then-detail fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareGuide {
    pub species_id: i64,
    pub sections: Vec<CareSection>,
}

/// Pest or disease affecting a species. The detail body is catalog-shaped
/// JSON we pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestDisease {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub description: serde_json::Value,
}

/// Filters for a paginated species search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
    pub indoor: Option<bool>,
    pub edible: Option<bool>,
    pub poisonous: Option<bool>,
    pub cycle: Option<String>,
    pub watering: Option<String>,
    pub sunlight: Option<String>,
}

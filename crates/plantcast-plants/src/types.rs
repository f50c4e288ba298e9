use serde::{Deserialize, Serialize};

/// Humidity range used to query plants tolerant of the ambient humidity.
///
/// Built as `[humidity - 20, humidity + 20]`. Bounds are NOT clamped to the
/// 0-100 percent range: out-of-range values pass straight through and the
/// search API applies its own policy to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumidityWindow {
    pub min: i32,
    pub max: i32,
}

impl HumidityWindow {
    /// Window of ±20 percentage points around the given humidity.
    pub fn around(humidity: i32) -> Self {
        Self {
            min: humidity - 20,
            max: humidity + 20,
        }
    }
}

impl std::fmt::Display for HumidityWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

/// One row of a plant search result.
///
/// Every field is optional on the wire. Identity is `id` when present,
/// otherwise the positional index within the current result sequence
/// (positional identity is not stable across re-fetches).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlantSummary {
    pub id: Option<i64>,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub image_url: Option<String>,
}

impl PlantSummary {
    /// Display name: common name, else scientific name, else "Sin nombre".
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .or(self.scientific_name.as_deref())
            .unwrap_or("Sin nombre")
    }

    /// Row key: the id when present, else the position in the result list.
    pub fn key(&self, index: usize) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }
}

/// Extended botanical record for a single plant.
///
/// Superset of [`PlantSummary`]; every nested field is optional and the
/// rendering layer substitutes a named fallback for each absence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlantDetail {
    pub id: Option<i64>,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub image_url: Option<String>,
    pub family_common_name: Option<String>,
    pub family: Option<NamedTaxon>,
    pub genus: Option<NamedTaxon>,
    pub duration: Option<String>,
    pub distribution: Option<Distribution>,
    pub flowering_months: Option<String>,
    pub flower_color: Option<String>,
    pub main_species: Option<MainSpecies>,
}

/// A taxon referenced by name only (family, genus).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedTaxon {
    pub name: Option<String>,
}

/// Where the plant natively occurs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub native: Vec<String>,
}

/// The representative species record carrying growth and size data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MainSpecies {
    pub growth: Option<Growth>,
    pub specifications: Option<Specifications>,
}

/// Growth conditions. Scalar scores are the API's 0-10 scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Growth {
    pub light: Option<i32>,
    pub soil_nutriments: Option<i32>,
    pub atmospheric_humidity: Option<i32>,
    pub minimum_temperature: Option<TemperatureSpec>,
    pub maximum_temperature: Option<TemperatureSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureSpec {
    pub deg_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specifications {
    pub average_height: Option<Height>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Height {
    pub cm: Option<f64>,
}

/// Plant database client errors
#[derive(Debug, thiserror::Error)]
pub enum PlantsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Plant API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Plant has no id")]
    MissingId,
}

//! Detail screen orchestration and rendering.
//!
//! Two independent fetches run concurrently: the botanical detail record
//! and a fresh permission-then-coordinates pass for the map pin. Neither
//! failure produces an error state: a failed detail fetch renders every
//! field's fallback, and a missing location just omits the map section.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use plantcast_location::{Coordinates, LocationProvider};
use plantcast_plants::{PlantDetail, PlantSummary, PlantsClient, PlantsError};

use crate::diagnostics::{DiagnosticsSink, TracingSink};

/// Section title of the map block; present only when a location fix exists.
const MAP_SECTION_TITLE: &str = "Tu ubicación";

/// Drives the detail screen's two-fetch orchestration.
pub struct DetailController<L> {
    location: L,
    plants: PlantsClient,
    diagnostics: Arc<dyn DiagnosticsSink>,
    cancel: CancellationToken,
}

impl<L: LocationProvider> DetailController<L> {
    pub fn new(location: L, plants: PlantsClient) -> Self {
        Self::with_diagnostics(location, plants, Arc::new(TracingSink))
    }

    pub fn with_diagnostics(
        location: L,
        plants: PlantsClient,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            location,
            plants,
            diagnostics,
            cancel: CancellationToken::new(),
        }
    }

    /// Cancel the in-flight fetches; late results are discarded.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Fetch detail and location concurrently and assemble the screen.
    /// Returns `None` only when the screen was torn down mid-flight.
    pub async fn load(&self, plant: &PlantSummary) -> Option<DetailScreen> {
        let cancel = self.cancel.clone();
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Detail screen torn down mid-fetch; discarding result");
                None
            }
            screen = self.run_sequence(plant) => Some(screen),
        }
    }

    async fn run_sequence(&self, plant: &PlantSummary) -> DetailScreen {
        let (detail, location) =
            tokio::join!(self.fetch_detail(plant), self.fetch_location());
        DetailScreen { detail, location }
    }

    /// Total-fallback policy: any failure substitutes an empty record, so
    /// the screen renders placeholders instead of a hard error.
    async fn fetch_detail(&self, plant: &PlantSummary) -> PlantDetail {
        let result = match plant.id {
            Some(id) => self.plants.fetch_detail(id).await,
            None => Err(PlantsError::MissingId),
        };

        match result {
            Ok(detail) => detail,
            Err(e) => {
                self.diagnostics.plant_detail_failed(plant.id, &e);
                PlantDetail::default()
            }
        }
    }

    /// Same permission-then-coordinates pass as the list screen. Denial or
    /// a missing fix is not an error here; the map section is just omitted.
    async fn fetch_location(&self) -> Option<Coordinates> {
        if !self.location.request_permission().await.is_granted() {
            tracing::info!("Location permission denied; omitting map section");
            return None;
        }
        match self.location.current_coordinates().await {
            Ok(coords) => Some(coords),
            Err(e) => {
                tracing::debug!("No location fix for map section: {}", e);
                None
            }
        }
    }
}

impl<L> Drop for DetailController<L> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// A titled block of rendered lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

/// Everything the detail screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailScreen {
    pub detail: PlantDetail,
    pub location: Option<Coordinates>,
}

impl DetailScreen {
    /// Screen title: common name, else scientific name, else "Sin nombre".
    pub fn title(&self) -> &str {
        self.detail
            .common_name
            .as_deref()
            .or(self.detail.scientific_name.as_deref())
            .unwrap_or("Sin nombre")
    }

    /// True when the map block is part of the render.
    pub fn has_map_section(&self) -> bool {
        self.location.is_some()
    }

    /// Assemble all sections. Every field falls back independently; no
    /// absent field blocks a sibling from rendering.
    pub fn sections(&self) -> Vec<Section> {
        let detail = &self.detail;
        let species = detail.main_species.as_ref();
        let growth = species.and_then(|s| s.growth.as_ref());
        let specs = species.and_then(|s| s.specifications.as_ref());

        let mut sections = Vec::new();

        sections.push(Section {
            title: "Detalles generales".to_string(),
            lines: vec![
                format!(
                    "Nombre científico: {}",
                    detail.scientific_name.as_deref().unwrap_or("N/A")
                ),
                format!("Familia: {}", family_label(detail)),
                format!(
                    "Género: {}",
                    detail
                        .genus
                        .as_ref()
                        .and_then(|g| g.name.as_deref())
                        .unwrap_or("Desconocido")
                ),
                format!(
                    "Ciclo de vida: {}",
                    detail.duration.as_deref().unwrap_or("N/A")
                ),
                format!(
                    "Altura promedio: {} cm",
                    specs
                        .and_then(|s| s.average_height.as_ref())
                        .and_then(|h| h.cm)
                        .map(|cm| cm.to_string())
                        .unwrap_or_else(|| "N/A".to_string())
                ),
            ],
        });

        sections.push(Section {
            title: "Cuidados recomendados".to_string(),
            lines: vec![
                format!(
                    "Riego: {}",
                    growth
                        .and_then(|g| g.atmospheric_humidity)
                        .map(|h| h.to_string())
                        .unwrap_or_else(|| "Mantener suelo húmedo".to_string())
                ),
                format!(
                    "Luz: {}",
                    growth
                        .and_then(|g| g.light)
                        .map(|l| l.to_string())
                        .unwrap_or_else(|| "Soleado o semisombra".to_string())
                ),
                format!("Temperatura: {}", temperature_label(detail)),
                format!(
                    "Suelo: {}",
                    growth
                        .and_then(|g| g.soil_nutriments)
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Bien drenado y fértil".to_string())
                ),
            ],
        });

        // Lines here only appear when the data exists
        let mut distribution_lines = Vec::new();
        if let Some(native) = detail
            .distribution
            .as_ref()
            .map(|d| &d.native)
            .filter(|n| !n.is_empty())
        {
            distribution_lines.push(format!("Nativa de: {}", native.join(", ")));
        }
        if let Some(months) = &detail.flowering_months {
            distribution_lines.push(format!("Época de floración: {}", months));
        }
        if let Some(color) = &detail.flower_color {
            distribution_lines.push(format!("Color de flor: {}", color));
        }
        sections.push(Section {
            title: "Distribución y floración".to_string(),
            lines: distribution_lines,
        });

        if let Some(coords) = self.location {
            sections.push(Section {
                title: MAP_SECTION_TITLE.to_string(),
                lines: vec![format!(
                    "Marcador: {}, {}",
                    coords.latitude, coords.longitude
                )],
            });
        }

        sections
    }

    /// Text rendering of the whole screen.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title());
        for section in self.sections() {
            out.push_str(&format!("\n{}\n", section.title));
            for line in section.lines {
                out.push_str(&format!("{}\n", line));
            }
        }
        out
    }
}

/// Family label: common family name, else taxon name, else "Desconocida".
fn family_label(detail: &PlantDetail) -> &str {
    detail
        .family_common_name
        .as_deref()
        .or_else(|| detail.family.as_ref().and_then(|f| f.name.as_deref()))
        .unwrap_or("Desconocida")
}

/// Temperature line: both bounds when known, else the generic advice.
fn temperature_label(detail: &PlantDetail) -> String {
    let growth = detail
        .main_species
        .as_ref()
        .and_then(|s| s.growth.as_ref());
    let min = growth
        .and_then(|g| g.minimum_temperature.as_ref())
        .and_then(|t| t.deg_c);
    let max = growth
        .and_then(|g| g.maximum_temperature.as_ref())
        .and_then(|t| t.deg_c);

    match (min, max) {
        (Some(min), Some(max)) => format!("Entre {}°C y {}°C", min, max),
        _ => "Ideal entre 15°C y 25°C".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantcast_plants::types::{
        Growth, Height, MainSpecies, NamedTaxon, Specifications, TemperatureSpec,
    };

    fn screen(detail: PlantDetail, location: Option<Coordinates>) -> DetailScreen {
        DetailScreen { detail, location }
    }

    #[test]
    fn empty_record_renders_every_fallback() {
        let s = screen(PlantDetail::default(), None);
        assert_eq!(s.title(), "Sin nombre");

        let rendered = s.render();
        assert!(rendered.contains("Nombre científico: N/A"));
        assert!(rendered.contains("Familia: Desconocida"));
        assert!(rendered.contains("Género: Desconocido"));
        assert!(rendered.contains("Ciclo de vida: N/A"));
        assert!(rendered.contains("Altura promedio: N/A cm"));
        assert!(rendered.contains("Riego: Mantener suelo húmedo"));
        assert!(rendered.contains("Luz: Soleado o semisombra"));
        assert!(rendered.contains("Temperatura: Ideal entre 15°C y 25°C"));
        assert!(rendered.contains("Suelo: Bien drenado y fértil"));
    }

    #[test]
    fn populated_record_renders_values() {
        let detail = PlantDetail {
            common_name: Some("Lavanda".into()),
            scientific_name: Some("Lavandula angustifolia".into()),
            family_common_name: Some("Lamiáceas".into()),
            genus: Some(NamedTaxon {
                name: Some("Lavandula".into()),
            }),
            duration: Some("perennial".into()),
            main_species: Some(MainSpecies {
                growth: Some(Growth {
                    light: Some(8),
                    soil_nutriments: Some(4),
                    atmospheric_humidity: Some(3),
                    minimum_temperature: Some(TemperatureSpec { deg_c: Some(5.0) }),
                    maximum_temperature: Some(TemperatureSpec { deg_c: Some(30.0) }),
                }),
                specifications: Some(Specifications {
                    average_height: Some(Height { cm: Some(60.0) }),
                }),
            }),
            ..Default::default()
        };

        let s = screen(detail, None);
        assert_eq!(s.title(), "Lavanda");

        let rendered = s.render();
        assert!(rendered.contains("Nombre científico: Lavandula angustifolia"));
        assert!(rendered.contains("Familia: Lamiáceas"));
        assert!(rendered.contains("Género: Lavandula"));
        assert!(rendered.contains("Altura promedio: 60 cm"));
        assert!(rendered.contains("Riego: 3"));
        assert!(rendered.contains("Luz: 8"));
        assert!(rendered.contains("Temperatura: Entre 5°C y 30°C"));
        assert!(rendered.contains("Suelo: 4"));
    }

    #[test]
    fn family_falls_back_to_taxon_name() {
        let detail = PlantDetail {
            family: Some(NamedTaxon {
                name: Some("Rosaceae".into()),
            }),
            ..Default::default()
        };
        assert_eq!(family_label(&detail), "Rosaceae");
    }

    #[test]
    fn single_temperature_bound_uses_generic_advice() {
        // Only one bound present: same fallback as none at all
        let detail = PlantDetail {
            main_species: Some(MainSpecies {
                growth: Some(Growth {
                    minimum_temperature: Some(TemperatureSpec { deg_c: Some(5.0) }),
                    ..Default::default()
                }),
                specifications: None,
            }),
            ..Default::default()
        };
        assert_eq!(temperature_label(&detail), "Ideal entre 15°C y 25°C");
    }

    #[test]
    fn distribution_lines_only_when_present() {
        let s = screen(PlantDetail::default(), None);
        let sections = s.sections();
        let distribution = sections
            .iter()
            .find(|sec| sec.title == "Distribución y floración")
            .unwrap();
        assert!(distribution.lines.is_empty());

        let detail = PlantDetail {
            distribution: Some(plantcast_plants::types::Distribution {
                native: vec!["Europe".into(), "Asia".into()],
            }),
            flowering_months: Some("jun-ago".into()),
            flower_color: Some("violeta".into()),
            ..Default::default()
        };
        let s = screen(detail, None);
        let sections = s.sections();
        let distribution = sections
            .iter()
            .find(|sec| sec.title == "Distribución y floración")
            .unwrap();
        assert_eq!(distribution.lines.len(), 3);
        assert!(distribution.lines[0].contains("Europe, Asia"));
    }

    #[test]
    fn map_section_present_only_with_location() {
        let without = screen(PlantDetail::default(), None);
        assert!(!without.has_map_section());
        assert!(!without.render().contains("Tu ubicación"));

        let with = screen(
            PlantDetail::default(),
            Some(Coordinates {
                latitude: 10.0,
                longitude: 20.0,
            }),
        );
        assert!(with.has_map_section());
        let rendered = with.render();
        assert!(rendered.contains("Tu ubicación"));
        assert!(rendered.contains("Marcador: 10, 20"));
    }
}

//! The canonical intervention catalog.
//!
//! The catalog defines the ordering contract shared with the projection
//! server: position in the table is the canonical index into the `alpha` and
//! `beta` coefficient arrays. The table is versioned so a client and server
//! calibrated against different orderings can detect the drift instead of
//! silently misaligning coefficients.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Number of policy levers in the canonical ordering.
pub const INTERVENTION_COUNT: usize = 20;

/// Version of the built-in catalog ordering.
pub const CATALOG_VERSION: u32 = 1;

/// Raw slider state: intervention name to intensity in 0..=100.
pub type RawSettings = FxHashMap<String, f64>;

/// Policy area an intervention belongs to, used for grouping in sensitivity
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    LandWater,
    Productivity,
    Technology,
    ValueChain,
    FinanceRisk,
}

impl Category {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Category::LandWater => "Land & Water Systems",
            Category::Productivity => "Productivity Enhancement",
            Category::Technology => "Technology & Innovation",
            Category::ValueChain => "Value Chain & Markets",
            Category::FinanceRisk => "Finance & Risk Management",
        }
    }
}

/// A single policy lever.
///
/// `inverted` marks levers where a higher raw slider value means a *worse*
/// outcome (currently only postharvest loss, measured as a percentage lost).
/// The flag lives in data rather than in estimator code so reorderings and
/// future inverted levers need no logic changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    pub name: String,
    pub category: Category,
    pub inverted: bool,
    /// Dashboard default intensity for this lever (raw 0..=100 scale).
    pub default_target: f64,
    /// Normalized budget cost of full implementation.
    pub cost: f64,
}

/// Ordered intervention table plus a name index.
///
/// Lookup is always by name; unknown names are ignored rather than rejected
/// so a stale UI cannot crash the estimator.
#[derive(Debug, Clone)]
pub struct InterventionCatalog {
    version: u32,
    entries: Vec<Intervention>,
    index: FxHashMap<String, usize>,
}

impl InterventionCatalog {
    #[must_use]
    pub fn new(version: u32, entries: Vec<Intervention>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self {
            version,
            entries,
            index,
        }
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[Intervention] {
        &self.entries
    }

    /// Canonical index of an intervention, or `None` for unknown names.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Intervention> {
        self.index_of(name).map(|i| &self.entries[i])
    }

    /// Build the ordering-aligned, normalized intervention vector.
    ///
    /// Raw values are clamped to 0..=100 and scaled to 0..=1; inverted levers
    /// contribute `(100 - raw) / 100`. Names absent from `settings` count as
    /// zero intensity, and names in `settings` that are not in the catalog
    /// are ignored.
    #[must_use]
    pub fn normalized_vector(&self, settings: &RawSettings) -> Vec<f64> {
        self.entries
            .iter()
            .map(|entry| {
                let raw = settings
                    .get(&entry.name)
                    .copied()
                    .unwrap_or(0.0)
                    .clamp(0.0, 100.0);
                let effective = if entry.inverted { 100.0 - raw } else { raw };
                effective / 100.0
            })
            .collect()
    }

    /// Raw settings seeded with each lever's dashboard default.
    #[must_use]
    pub fn default_settings(&self) -> RawSettings {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.default_target))
            .collect()
    }
}

impl Default for InterventionCatalog {
    fn default() -> Self {
        Self::new(CATALOG_VERSION, builtin_entries())
    }
}

fn builtin_entries() -> Vec<Intervention> {
    use Category::*;

    let rows: [(&str, Category, bool, f64, f64); INTERVENTION_COUNT] = [
        ("Land Consolidation", LandWater, false, 80.0, 5.0),
        ("Land Use Productivity", LandWater, false, 85.0, 4.0),
        (
            "Irrigation & Water Use Efficiency",
            LandWater,
            false,
            88.0,
            6.0,
        ),
        ("Climate Adaptation Index", LandWater, false, 75.0, 3.0),
        ("Staple Crop Productivity", Productivity, false, 82.0, 4.0),
        ("Cash Crop Productivity", Productivity, false, 80.0, 5.0),
        (
            "Livestock Productivity (Breed Improvement & Feeding Systems)",
            Productivity,
            false,
            83.0,
            5.0,
        ),
        (
            "Inputs Efficiency (fertilizer, seeds)",
            Productivity,
            false,
            80.0,
            4.0,
        ),
        ("Soil Health Indicators", LandWater, false, 82.0, 3.0),
        ("Mechanization", Technology, false, 78.0, 6.0),
        ("Digital Agriculture Adoption", Technology, false, 85.0, 3.0),
        (
            "R&D + Extension (AI-augmented advisory)",
            Technology,
            false,
            88.0,
            4.0,
        ),
        (
            "Digital Twin simulations for plots & cooperatives",
            Technology,
            false,
            85.0,
            2.0,
        ),
        ("Postharvest Loss (%)", ValueChain, true, 22.0, 3.0),
        (
            "Storage/Processing Value Addition",
            ValueChain,
            false,
            80.0,
            4.0,
        ),
        ("Access to Finance", FinanceRisk, false, 82.0, 3.0),
        ("Insurance Penetration", FinanceRisk, false, 72.0, 3.0),
        ("Domestic Market Integration", ValueChain, false, 85.0, 4.0),
        ("Export Competitiveness", ValueChain, false, 82.0, 5.0),
        (
            "Supply–Demand Stability Score (AI forecast model)",
            FinanceRisk,
            false,
            87.0,
            3.0,
        ),
    ];

    rows.into_iter()
        .map(|(name, category, inverted, default_target, cost)| Intervention {
            name: name.to_string(),
            category,
            inverted,
            default_target,
            cost,
        })
        .collect()
}

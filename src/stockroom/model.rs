use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::units;

/// The stock categories that share the `code / name / quantity` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Products,
    SafetyItems,
    Labels,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Products, Category::SafetyItems, Category::Labels];

    pub fn table_name(&self) -> &'static str {
        match self {
            Category::Products => "products",
            Category::SafetyItems => "safety_items",
            Category::Labels => "labels",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Products => "Main stock",
            Category::SafetyItems => "Safety equipment",
            Category::Labels => "Labels / sleeves",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" | "product" | "main" => Ok(Category::Products),
            "safety_items" | "safety-items" | "safety" | "ppe" => Ok(Category::SafetyItems),
            "labels" | "label" | "sleeves" => Ok(Category::Labels),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub code: String,
    pub name: String,
    pub quantity: i64,
}

impl StockItem {
    pub fn new(code: impl Into<String>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            quantity,
        }
    }
}

/// Partial edit of a [`StockItem`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

impl StockItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none()
    }

    pub fn apply(&self, item: &mut StockItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
    }
}

/// Unit a density was entered in. Densities are always stored in kg/L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DensityUnit {
    #[serde(rename = "kg/L")]
    KgPerLiter,
    #[serde(rename = "g/cm³")]
    GramPerCubicCentimeter,
    #[serde(rename = "kg/m³")]
    KgPerCubicMeter,
}

impl DensityUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityUnit::KgPerLiter => "kg/L",
            DensityUnit::GramPerCubicCentimeter => "g/cm³",
            DensityUnit::KgPerCubicMeter => "kg/m³",
        }
    }
}

impl Default for DensityUnit {
    fn default() -> Self {
        DensityUnit::KgPerLiter
    }
}

impl fmt::Display for DensityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DensityUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kg/L" | "kg/l" => Ok(DensityUnit::KgPerLiter),
            "g/cm³" | "g/cm3" => Ok(DensityUnit::GramPerCubicCentimeter),
            "kg/m³" | "kg/m3" => Ok(DensityUnit::KgPerCubicMeter),
            other => Err(format!("Unknown density unit: {}", other)),
        }
    }
}

/// A density as typed by the operator, before conversion to kg/L.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityInput {
    pub value: f64,
    pub unit: DensityUnit,
}

impl DensityInput {
    pub fn new(value: f64, unit: DensityUnit) -> Self {
        Self { value, unit }
    }

    pub fn kg_per_liter(&self) -> f64 {
        units::to_kg_per_liter(self.value, self.unit.as_str())
    }
}

/// A chemical / formulation ledger entry.
///
/// `kilograms` is derived from `density_kg_per_l * liters` and is refreshed by
/// [`ChemicalItem::recompute_mass`] on every write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalItem {
    pub code: String,
    pub name: String,
    pub density_kg_per_l: f64,
    pub source_unit: DensityUnit,
    pub liters: f64,
    pub kilograms: f64,
    pub storage_location: Option<String>,
    pub lot: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl ChemicalItem {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        density: DensityInput,
        liters: f64,
    ) -> Self {
        let density_kg_per_l = density.kg_per_liter();
        Self {
            code: code.into(),
            name: name.into(),
            density_kg_per_l,
            source_unit: density.unit,
            liters,
            kilograms: units::mass_kg(density_kg_per_l, liters),
            storage_location: None,
            lot: None,
            expiry_date: None,
        }
    }

    pub fn with_storage_location(mut self, location: Option<String>) -> Self {
        self.storage_location = location;
        self
    }

    pub fn with_lot(mut self, lot: Option<String>) -> Self {
        self.lot = lot;
        self
    }

    pub fn with_expiry_date(mut self, date: Option<NaiveDate>) -> Self {
        self.expiry_date = date;
        self
    }

    pub fn recompute_mass(&mut self) {
        self.kilograms = units::mass_kg(self.density_kg_per_l, self.liters);
    }
}

/// Partial edit of a [`ChemicalItem`].
///
/// Optional text columns use `Option<Option<_>>`: outer `None` keeps the
/// stored value, `Some(None)` clears it, `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChemicalUpdate {
    pub name: Option<String>,
    pub density: Option<DensityInput>,
    pub liters: Option<f64>,
    pub storage_location: Option<Option<String>>,
    pub lot: Option<Option<String>>,
    pub expiry_date: Option<Option<NaiveDate>>,
}

impl ChemicalUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.density.is_none()
            && self.liters.is_none()
            && self.storage_location.is_none()
            && self.lot.is_none()
            && self.expiry_date.is_none()
    }

    /// Applies the supplied fields and refreshes the stored mass.
    pub fn apply(&self, item: &mut ChemicalItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(density) = self.density {
            item.density_kg_per_l = density.kg_per_liter();
            item.source_unit = density.unit;
        }
        if let Some(liters) = self.liters {
            item.liters = liters;
        }
        if let Some(location) = &self.storage_location {
            item.storage_location = location.clone();
        }
        if let Some(lot) = &self.lot {
            item.lot = lot.clone();
        }
        if let Some(date) = self.expiry_date {
            item.expiry_date = date;
        }
        item.recompute_mass();
    }
}

/// A line of the flat, file-backed price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedStockItem {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl PricedStockItem {
    pub fn new(code: impl Into<String>, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            quantity,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_aliases() {
        assert_eq!("safety".parse::<Category>().unwrap(), Category::SafetyItems);
        assert_eq!("Labels".parse::<Category>().unwrap(), Category::Labels);
        assert!("chemicals".parse::<Category>().is_err());
    }

    #[test]
    fn density_unit_accepts_ascii_spellings() {
        assert_eq!(
            "g/cm3".parse::<DensityUnit>().unwrap(),
            DensityUnit::GramPerCubicCentimeter
        );
        assert_eq!(
            "kg/m3".parse::<DensityUnit>().unwrap(),
            DensityUnit::KgPerCubicMeter
        );
    }

    #[test]
    fn chemical_mass_is_derived_on_creation() {
        let item = ChemicalItem::new(
            "Q1",
            "Solvent",
            DensityInput::new(850.0, DensityUnit::KgPerCubicMeter),
            20.0,
        );
        assert!((item.density_kg_per_l - 0.85).abs() < 1e-9);
        assert!((item.kilograms - 17.0).abs() < 1e-9);
    }

    #[test]
    fn chemical_update_recomputes_mass() {
        let mut item = ChemicalItem::new(
            "Q1",
            "Solvent",
            DensityInput::new(1.2, DensityUnit::KgPerLiter),
            10.0,
        );
        let update = ChemicalUpdate {
            liters: Some(5.0),
            ..Default::default()
        };
        update.apply(&mut item);
        assert!((item.kilograms - 6.0).abs() < 1e-9);
    }

    #[test]
    fn chemical_update_can_clear_optional_fields() {
        let mut item = ChemicalItem::new(
            "Q1",
            "Solvent",
            DensityInput::new(1.0, DensityUnit::KgPerLiter),
            1.0,
        )
        .with_lot(Some("L-7".into()));
        let update = ChemicalUpdate {
            lot: Some(None),
            ..Default::default()
        };
        update.apply(&mut item);
        assert_eq!(item.lot, None);
    }
}

//! Density conversion for the chemical ledger.
//!
//! Densities are stored in kg/L. `g/cm³` is numerically the same as kg/L,
//! `kg/m³` is scaled by 0.001. Any other unit string is passed through
//! unchanged.

pub const KG_PER_M3_TO_KG_PER_L: f64 = 0.001;

pub fn to_kg_per_liter(value: f64, unit: &str) -> f64 {
    match unit.trim() {
        "kg/L" | "kg/l" | "g/cm³" | "g/cm3" => value,
        "kg/m³" | "kg/m3" => value * KG_PER_M3_TO_KG_PER_L,
        _ => value,
    }
}

pub fn mass_kg(density_kg_per_l: f64, liters: f64) -> f64 {
    density_kg_per_l * liters
}

use crate::commands::{CmdResult, MassPreview};
use crate::error::Result;
use crate::units;

use super::helpers::{optional_text, parse_decimal};

/// Live mass preview for a density and a volume. Touches no store.
///
/// A blank volume counts as zero litres so the preview works while the form is
/// half filled. The unit string goes straight to [`units::to_kg_per_liter`],
/// which treats unknown units as kg/L.
pub fn run(density: &str, unit: &str, liters: &str) -> Result<CmdResult> {
    let density = parse_decimal("Density", density)?;
    let liters = match optional_text(Some(liters)) {
        Some(raw) => parse_decimal("Liters", &raw)?,
        None => 0.0,
    };
    let density_kg_per_l = units::to_kg_per_liter(density, unit);
    let preview = MassPreview {
        density_kg_per_l,
        liters,
        kilograms: units::mass_kg(density_kg_per_l, liters),
    };
    Ok(CmdResult::default().with_preview(preview))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;

    #[test]
    fn converts_kg_per_cubic_meter() {
        let preview = run("1200", "kg/m³", "2.5").unwrap().preview.unwrap();
        assert!((preview.density_kg_per_l - 1.2).abs() < 1e-9);
        assert!((preview.kilograms - 3.0).abs() < 1e-9);
    }

    #[test]
    fn blank_volume_is_zero() {
        let preview = run("1.3", "kg/L", "").unwrap().preview.unwrap();
        assert_eq!(preview.kilograms, 0.0);
    }

    #[test]
    fn unknown_unit_passes_through() {
        let preview = run("2", "oz/in³", "3").unwrap().preview.unwrap();
        assert_eq!(preview.density_kg_per_l, 2.0);
        assert_eq!(preview.kilograms, 6.0);
    }

    #[test]
    fn non_numeric_density_is_invalid() {
        assert!(matches!(
            run("x", "kg/L", "1"),
            Err(StockError::Validation(_))
        ));
    }
}

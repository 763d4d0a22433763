//! Filament material properties

use serde::{Deserialize, Serialize};

/// Filament used for the print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentMaterial {
    /// Display name
    pub name: String,
    /// Density (g/cm^3)
    pub density_g_cm3: f64,
}

impl FilamentMaterial {
    pub fn new(name: impl Into<String>, density_g_cm3: f64) -> Self {
        Self {
            name: name.into(),
            density_g_cm3,
        }
    }

    /// Polylactic acid, the usual choice for vase-mode prints.
    pub fn pla() -> Self {
        Self::new("PLA", 1.24)
    }

    /// Mass in grams of `volume_mm3` cubic millimetres of material.
    pub fn mass_grams(&self, volume_mm3: f64) -> f64 {
        volume_mm3 / 1000.0 * self.density_g_cm3
    }
}

impl Default for FilamentMaterial {
    fn default() -> Self {
        Self::pla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pla_mass() {
        let pla = FilamentMaterial::pla();
        assert_eq!(pla.mass_grams(1000.0), 1.24);
        assert_eq!(pla.mass_grams(0.0), 0.0);
    }
}

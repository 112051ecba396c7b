//! Small element tables shared by the unit tests.

use super::{ElementRecord, PeriodicTable};

#[allow(clippy::too_many_arguments)]
fn element(
    number: u32,
    symbol: &str,
    name: &str,
    category: &str,
    xpos: u32,
    ypos: u32,
    phase: &str,
    atomic_mass: f64,
    density: Option<f64>,
    boil: Option<f64>,
) -> ElementRecord {
    ElementRecord {
        number,
        symbol: symbol.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        xpos: Some(xpos),
        ypos: Some(ypos),
        phase: Some(phase.to_string()),
        atomic_mass: Some(atomic_mass),
        density,
        boil,
        ..Default::default()
    }
}

/// Ten elements with distinct atomic masses, iron among them.
pub fn sample_elements() -> Vec<ElementRecord> {
    vec![
        element(1, "H", "Hydrogen", "diatomic nonmetal", 1, 1, "Gas", 1.008, Some(0.08988), Some(20.271)),
        element(2, "He", "Helium", "noble gas", 18, 1, "Gas", 4.0026, Some(0.1786), Some(4.222)),
        element(3, "Li", "Lithium", "alkali metal", 1, 2, "Solid", 6.94, Some(0.534), Some(1603.0)),
        element(6, "C", "Carbon", "polyatomic nonmetal", 14, 2, "Solid", 12.011, Some(1.821), None),
        element(8, "O", "Oxygen", "diatomic nonmetal", 16, 2, "Gas", 15.999, Some(1.429), Some(90.188)),
        element(11, "Na", "Sodium", "alkali metal", 1, 3, "Solid", 22.99, Some(0.968), Some(1156.09)),
        element(17, "Cl", "Chlorine", "diatomic nonmetal", 17, 3, "Gas", 35.45, Some(3.2), Some(239.11)),
        element(26, "Fe", "Iron", "transition metal", 8, 4, "Solid", 55.8, Some(7.874), Some(3134.0)),
        element(29, "Cu", "Copper", "transition metal", 11, 4, "Solid", 63.546, Some(8.96), Some(2835.0)),
        element(79, "Au", "Gold", "transition metal", 11, 6, "Solid", 196.967, Some(19.3), Some(3243.0)),
    ]
}

pub fn sample_table() -> PeriodicTable {
    PeriodicTable::from_elements(sample_elements()).unwrap()
}

/// A single element with no optional data at all.
pub fn bare_element() -> ElementRecord {
    ElementRecord {
        number: 118,
        symbol: "Og".to_string(),
        name: "Oganesson".to_string(),
        ..Default::default()
    }
}

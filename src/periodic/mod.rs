pub mod element;
#[cfg(test)]
pub mod fixtures;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use element::{ElementRecord, FieldKey, FieldValue};

use crate::error::DatasetError;

/// Shape of the Periodic-Table-JSON document.
#[derive(serde::Deserialize)]
struct TableDocument {
    elements: Vec<ElementRecord>,
}

/// The immutable, already-loaded element table.
#[derive(Debug, Clone, Default)]
pub struct PeriodicTable {
    elements: Vec<ElementRecord>,
}

impl PeriodicTable {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        Self::new(File::open(path)?)
    }

    pub fn new(file: File) -> Result<Self, DatasetError> {
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let document: TableDocument = serde_json::from_reader(reader)?;
        Self::from_elements(document.elements)
    }

    /// Builds a table, keeping the given order.
    /// Atomic numbers and symbols have to be unique.
    pub fn from_elements(elements: Vec<ElementRecord>) -> Result<Self, DatasetError> {
        if elements.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut numbers = HashSet::new();
        let mut symbols = HashSet::new();
        for element in &elements {
            if !numbers.insert(element.number) {
                return Err(DatasetError::DuplicateNumber(element.number));
            }
            if !symbols.insert(element.symbol.as_str()) {
                return Err(DatasetError::DuplicateSymbol(element.symbol.clone()));
            }
        }

        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Exact symbol match ("Fe", not "fe").
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&ElementRecord> {
        self.elements.iter().find(|e| e.symbol == symbol)
    }

    /// Resolves whatever a user typed: a symbol in any case, a name in any case,
    /// or an atomic number.
    pub fn resolve(&self, input: &str) -> Option<&ElementRecord> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(element) = self.find_by_symbol(input) {
            return Some(element);
        }
        if let Some(element) = self
            .elements
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(input) || e.name.eq_ignore_ascii_case(input))
        {
            return Some(element);
        }
        input
            .parse::<u32>()
            .ok()
            .and_then(|number| self.elements.iter().find(|e| e.number == number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "elements": [
            {
                "name": "Hydrogen",
                "appearance": "colorless gas",
                "atomic_mass": 1.008,
                "boil": 20.271,
                "category": "diatomic nonmetal",
                "density": 0.08988,
                "melt": 13.99,
                "number": 1,
                "period": 1,
                "group": 1,
                "phase": "Gas",
                "symbol": "H",
                "xpos": 1,
                "ypos": 1,
                "shells": [1],
                "electron_configuration": "1s1",
                "cpk-hex": "ffffff"
            },
            {
                "name": "Oganesson",
                "appearance": null,
                "atomic_mass": 294.214,
                "boil": null,
                "category": "unknown, predicted to be noble gas",
                "density": null,
                "number": 118,
                "phase": "Solid",
                "symbol": "Og",
                "xpos": 18,
                "ypos": 7
            }
        ]
    }"#;

    #[test]
    fn parses_dataset_document() {
        let table = PeriodicTable::from_reader(SAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let hydrogen = table.find_by_symbol("H").unwrap();
        assert_eq!(hydrogen.name, "Hydrogen");
        assert_eq!(hydrogen.atomic_mass, Some(1.008));
        assert_eq!(hydrogen.group, Some(1));

        let oganesson = table.find_by_symbol("Og").unwrap();
        assert_eq!(oganesson.boil, None);
        assert_eq!(oganesson.density, None);
        assert_eq!(oganesson.appearance, None);
    }

    #[test]
    fn rejects_duplicate_symbols_and_numbers() {
        let h = ElementRecord {
            number: 1,
            symbol: "H".into(),
            name: "Hydrogen".into(),
            ..Default::default()
        };
        let mut same_number = h.clone();
        same_number.symbol = "X".into();
        assert!(matches!(
            PeriodicTable::from_elements(vec![h.clone(), same_number]),
            Err(DatasetError::DuplicateNumber(1))
        ));

        let mut same_symbol = h.clone();
        same_symbol.number = 2;
        assert!(matches!(
            PeriodicTable::from_elements(vec![h, same_symbol]),
            Err(DatasetError::DuplicateSymbol(s)) if s == "H"
        ));
    }

    #[test]
    fn rejects_empty_and_malformed_documents() {
        assert!(matches!(
            PeriodicTable::from_reader(r#"{"elements": []}"#.as_bytes()),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(
            PeriodicTable::from_reader("not json".as_bytes()),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("periodic-tgbot-no-such-table.json");
        assert!(matches!(PeriodicTable::open(&path), Err(DatasetError::Io(_))));
    }

    #[test]
    fn opens_a_table_from_disk() {
        let path = std::env::temp_dir().join(format!("periodic-tgbot-table-{}.json", std::process::id()));
        std::fs::write(&path, SAMPLE_JSON).unwrap();
        let table = PeriodicTable::open(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(table.unwrap().len(), 2);
    }

    #[test]
    fn symbol_lookup_is_exact() {
        let table = PeriodicTable::from_reader(SAMPLE_JSON.as_bytes()).unwrap();
        assert!(table.find_by_symbol("h").is_none());
        assert!(table.find_by_symbol("Xx").is_none());
    }

    #[test]
    fn resolves_user_input() {
        let table = fixtures::sample_table();
        assert_eq!(table.resolve("Fe").unwrap().name, "Iron");
        assert_eq!(table.resolve(" fe ").unwrap().name, "Iron");
        assert_eq!(table.resolve("iron").unwrap().symbol, "Fe");
        assert_eq!(table.resolve("26").unwrap().symbol, "Fe");
        assert!(table.resolve("Unobtainium").is_none());
        assert!(table.resolve("").is_none());
    }
}

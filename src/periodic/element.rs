use std::fmt;

/// Shown instead of the correct answer when the element lacks the asked field.
pub const NOT_AVAILABLE: &str = "not available";

/// Shown on the element card for absent values.
const CARD_PLACEHOLDER: &str = "N/A";

/// One row of the Periodic-Table-JSON dataset.
///
/// Only `number`, `symbol` and `name` are guaranteed; every other field may be
/// missing or `null` in the source document. Fields the bot has no use for are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ElementRecord {
    pub number: u32,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub xpos: Option<u32>,
    #[serde(default)]
    pub ypos: Option<u32>,
    #[serde(default)]
    pub period: Option<u32>,
    #[serde(default)]
    pub group: Option<u32>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub atomic_mass: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub boil: Option<f64>,
    #[serde(default)]
    pub melt: Option<f64>,
    #[serde(default)]
    pub electron_configuration: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub discovered_by: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ElementRecord {
    /// Reads the value a quiz question can ask about.
    pub fn field(&self, key: FieldKey) -> Option<FieldValue> {
        match key {
            FieldKey::Number => Some(FieldValue::Integer(self.number.into())),
            FieldKey::Symbol => Some(FieldValue::Text(self.symbol.clone())),
            FieldKey::Category => self.category.clone().map(FieldValue::Text),
            FieldKey::XPos => self.xpos.map(|x| FieldValue::Integer(x.into())),
            FieldKey::YPos => self.ypos.map(|y| FieldValue::Integer(y.into())),
            FieldKey::Phase => self.phase.clone().map(FieldValue::Text),
            FieldKey::AtomicMass => self.atomic_mass.map(FieldValue::Real),
            FieldKey::Density => self.density.map(FieldValue::Real),
            FieldKey::Boil => self.boil.map(FieldValue::Real),
        }
    }

    /// Like [`ElementRecord::field`], but an absent value becomes the
    /// [`NOT_AVAILABLE`] placeholder.
    pub fn field_or_placeholder(&self, key: FieldKey) -> FieldValue {
        self.field(key)
            .unwrap_or_else(|| FieldValue::Text(NOT_AVAILABLE.to_string()))
    }

    /// Plain-text details card, the same facts the table's details panel lists.
    pub fn card(&self) -> String {
        format!(
            "{} ({})\n\
             Atomic number: {}\n\
             Atomic mass: {}\n\
             Category: {}\n\
             Group: {}\n\
             Period: {}\n\
             Electron configuration: {}\n\
             State: {}",
            self.name,
            self.symbol,
            self.number,
            or_na(self.atomic_mass),
            or_na(self.category.as_deref()),
            or_na(self.xpos),
            or_na(self.ypos),
            or_na(self.electron_configuration.as_deref()),
            or_na(self.phase.as_deref()),
        )
    }

    /// The longer "read more" view: description and the remaining facts.
    pub fn details(&self) -> String {
        let mut text = format!(
            "{} ({})\n\
             Appearance: {}\n\
             Discovered by: {}\n\
             Melting point: {}\n\
             Boiling point: {}\n\
             Density: {}\n\
             Period: {}, group: {}",
            self.name,
            self.symbol,
            or_na(self.appearance.as_deref()),
            or_na(self.discovered_by.as_deref()),
            or_na(self.melt),
            or_na(self.boil),
            or_na(self.density),
            or_na(self.period),
            or_na(self.group),
        );
        if let Some(summary) = &self.summary {
            text.push_str("\n\n");
            text.push_str(summary);
        }
        text
    }
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| CARD_PLACEHOLDER.to_string())
}

/// Attributes of an [`ElementRecord`] that a question template can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Number,
    Symbol,
    Category,
    XPos,
    YPos,
    Phase,
    AtomicMass,
    Density,
    Boil,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Number => "number",
            FieldKey::Symbol => "symbol",
            FieldKey::Category => "category",
            FieldKey::XPos => "xpos",
            FieldKey::YPos => "ypos",
            FieldKey::Phase => "phase",
            FieldKey::AtomicMass => "atomic_mass",
            FieldKey::Density => "density",
            FieldKey::Boil => "boil",
        }
    }
}

/// A value read out of an element record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// The text shown on an option button.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Loose equality: both sides are compared by their normalized labels.
    pub fn matches(&self, other: &str) -> bool {
        normalize_label(&self.label()) == normalize_label(other)
    }

    pub fn same_as(&self, other: &FieldValue) -> bool {
        self.matches(&other.label())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Real(value) => write!(f, "{}", value),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

/// Canonical form of an answer label.
///
/// Surrounding whitespace is dropped. Text that parses as a finite number is
/// re-rendered the way a real value prints, so "26", "26.0" and " 26 " all
/// collapse to "26". Anything else is kept as typed.
pub fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => number.to_string(),
        _ => trimmed.to_string(),
    }
}

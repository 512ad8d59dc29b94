//! Field catalog and form field value objects

/// Cities the model was trained on, in display order
pub const CITY_OPTIONS: &[&str] = &[
    "bialystok",
    "bydgoszcz",
    "czestochowa",
    "gdansk",
    "gdynia",
    "katowice",
    "krakow",
    "lodz",
    "lublin",
    "poznan",
    "radom",
    "rzeszow",
    "szczecin",
    "warszawa",
    "wroclaw",
];

/// Affirmative token of a binary field
pub const YES_TOKEN: &str = "tak";
/// Negative token of a binary field
pub const NO_TOKEN: &str = "nie";

/// Lower bound of numeric steppers
pub const STEPPER_MIN: f64 = 0.0;
/// Upper bound of numeric steppers
pub const STEPPER_MAX: f64 = 9999.0;

/// How a field is edited and how its value is coerced on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of [`CITY_OPTIONS`]
    City,
    /// [`YES_TOKEN`] or [`NO_TOKEN`]
    Binary,
    /// Non-negative whole number
    Integer,
    /// Number with at most one fractional digit
    Decimal,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }

    /// Stepper increment for numeric kinds
    pub fn step(&self) -> f64 {
        match self {
            Self::Decimal => 0.1,
            _ => 1.0,
        }
    }
}

/// Static definition of a single form input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
}

impl FieldDefinition {
    const fn new(
        id: &'static str,
        label: &'static str,
        kind: FieldKind,
        default: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            kind,
            default,
        }
    }
}

/// Every feature the model expects, in form order
pub const FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new("city", "City", FieldKind::City, "gdynia"),
    FieldDefinition::new("buildYear", "Build year", FieldKind::Integer, "2005"),
    FieldDefinition::new("squareMeters", "Floor area (m²)", FieldKind::Decimal, "50.0"),
    FieldDefinition::new("rooms", "Rooms", FieldKind::Integer, "2"),
    FieldDefinition::new("floor", "Floor", FieldKind::Integer, "1"),
    FieldDefinition::new("floorCount", "Floors in building", FieldKind::Integer, "4"),
    FieldDefinition::new("hasParkingSpace", "Parking space", FieldKind::Binary, NO_TOKEN),
    FieldDefinition::new("hasBalcony", "Balcony", FieldKind::Binary, NO_TOKEN),
    FieldDefinition::new("hasElevator", "Elevator", FieldKind::Binary, NO_TOKEN),
    FieldDefinition::new("hasSecurity", "Security", FieldKind::Binary, NO_TOKEN),
    FieldDefinition::new("hasStorageRoom", "Storage room", FieldKind::Binary, NO_TOKEN),
    FieldDefinition::new(
        "poiCount",
        "Points of interest within 500 m",
        FieldKind::Integer,
        "3",
    ),
    FieldDefinition::new(
        "centreDistance",
        "Distance to centre (km)",
        FieldKind::Decimal,
        "5.0",
    ),
    FieldDefinition::new(
        "clinicDistance",
        "Distance to clinic (km)",
        FieldKind::Decimal,
        "2.0",
    ),
    FieldDefinition::new(
        "restaurantDistance",
        "Distance to restaurant (km)",
        FieldKind::Decimal,
        "1.0",
    ),
    FieldDefinition::new(
        "collegeDistance",
        "Distance to college (km)",
        FieldKind::Decimal,
        "4.0",
    ),
];

/// Represents a single form field with its definition and current raw value
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub definition: &'static FieldDefinition,
    pub value: String,
}

impl FormField {
    /// Create a field holding its default literal
    pub fn new(definition: &'static FieldDefinition) -> Self {
        Self {
            definition,
            value: definition.default.to_string(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.definition.id
    }

    pub fn label(&self) -> &'static str {
        self.definition.label
    }

    pub fn kind(&self) -> FieldKind {
        self.definition.kind
    }

    /// Restore the default literal without validation
    pub fn reset(&mut self) {
        self.value = self.definition.default.to_string();
    }

    /// Whether the binary field currently holds the affirmative token
    pub fn is_yes(&self) -> bool {
        self.value.trim().eq_ignore_ascii_case(YES_TOKEN)
    }

    /// Cycle through the enumeration of a categorical field.
    ///
    /// Numeric fields are left untouched.
    pub fn cycle(&mut self, forward: bool) {
        match self.kind() {
            FieldKind::City => {
                let current = CITY_OPTIONS
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(self.value.trim()));
                let len = CITY_OPTIONS.len();
                let next = match (current, forward) {
                    (Some(i), true) => (i + 1) % len,
                    (Some(0), false) => len - 1,
                    (Some(i), false) => i - 1,
                    (None, true) => 0,
                    (None, false) => len - 1,
                };
                self.value = CITY_OPTIONS[next].to_string();
            }
            FieldKind::Binary => {
                let token = if self.is_yes() { NO_TOKEN } else { YES_TOKEN };
                self.value = token.to_string();
            }
            FieldKind::Integer | FieldKind::Decimal => {}
        }
    }

    /// Step a numeric field up or down, clamped to the stepper range.
    ///
    /// Returns false when the current text is not a number.
    pub fn step(&mut self, up: bool) -> bool {
        let kind = self.kind();
        if !kind.is_numeric() {
            return false;
        }
        let trimmed = self.value.trim();
        let current = if trimmed.is_empty() {
            STEPPER_MIN
        } else {
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => return false,
            }
        };
        let delta = if up { kind.step() } else { -kind.step() };
        let next = (current + delta).clamp(STEPPER_MIN, STEPPER_MAX);
        self.value = match kind {
            FieldKind::Decimal => format!("{next:.1}"),
            _ => format!("{}", next.round() as i64),
        };
        true
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.kind() {
            FieldKind::Binary => {
                if self.is_yes() {
                    "(•) Yes  ( ) No".to_string()
                } else {
                    "( ) Yes  (•) No".to_string()
                }
            }
            FieldKind::City => format!("◀ {} ▶", self.value),
            FieldKind::Integer | FieldKind::Decimal => self.value.clone(),
        }
    }
}

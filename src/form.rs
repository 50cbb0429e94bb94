//! Experimental parameters collected by the form.
//!
//! The six fields always reach the model in [`Field::ALL`] order. Values are
//! clamped to their declared bounds on entry, mirroring what the numeric
//! widgets do, so a [`FeatureVector`] never holds an out-of-range value.

use std::fmt;

/// Number of model input features.
pub const FIELD_COUNT: usize = 6;

/// One numeric input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Reaction temperature in kelvin.
    Temperature,
    /// Methylene blue concentration in mg/L.
    MbConcentration,
    /// Oxidant concentration in mmol/L.
    OxidantConcentration,
    /// Catalyst dosage in g/L.
    CatalystDosage,
    /// Reaction time in minutes.
    ReactionTime,
    /// Solution pH.
    Ph,
}

impl Field {
    /// Fields in model feature order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Temperature,
        Field::MbConcentration,
        Field::OxidantConcentration,
        Field::CatalystDosage,
        Field::ReactionTime,
        Field::Ph,
    ];

    /// Position of this field in the feature vector.
    pub fn index(self) -> usize {
        match self {
            Field::Temperature => 0,
            Field::MbConcentration => 1,
            Field::OxidantConcentration => 2,
            Field::CatalystDosage => 3,
            Field::ReactionTime => 4,
            Field::Ph => 5,
        }
    }

    /// Widget declaration for this field.
    pub fn spec(self) -> FieldSpec {
        match self {
            Field::Temperature => FieldSpec::non_negative(298.0, 1.0),
            Field::MbConcentration => FieldSpec::non_negative(50.0, 1.0),
            Field::OxidantConcentration => FieldSpec::non_negative(10.0, 0.1),
            Field::CatalystDosage => FieldSpec::non_negative(0.5, 0.1),
            Field::ReactionTime => FieldSpec::non_negative(60.0, 1.0),
            Field::Ph => FieldSpec {
                default: 7.0,
                min: 1.0,
                max: 14.0,
                step: 0.1,
            },
        }
    }
}

/// Default, bounds and step of a numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub default: f64,
    pub min: f64,
    /// `f64::INFINITY` when the field has no upper bound.
    pub max: f64,
    pub step: f64,
}

impl FieldSpec {
    const fn non_negative(default: f64, step: f64) -> Self {
        Self {
            default,
            min: 0.0,
            max: f64::INFINITY,
            step,
        }
    }

    /// Clamp a finite value into bounds; `None` for NaN or infinities.
    pub fn clamp(&self, value: f64) -> Option<f64> {
        value.is_finite().then(|| value.clamp(self.min, self.max))
    }

    /// Decimal places implied by the step (`0.1` -> 1, `1.0` -> 0).
    pub fn decimals(&self) -> usize {
        let mut step = self.step.abs();
        let mut decimals = 0;
        while decimals < 6 && (step - step.round()).abs() > 1e-9 {
            step *= 10.0;
            decimals += 1;
        }
        decimals
    }

    /// Move `value` by `steps` increments, as the widget's +/- buttons do.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        let scale = 10f64.powi(self.decimals() as i32);
        let moved = ((value + self.step * f64::from(steps)) * scale).round() / scale;
        moved.clamp(self.min, self.max)
    }
}

/// The six inputs in model order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FIELD_COUNT],
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            values: Field::ALL.map(|field| field.spec().default),
        }
    }
}

impl FeatureVector {
    /// Build a vector from raw values, clamping each to its field's bounds.
    ///
    /// Non-finite entries fall back to the field default.
    pub fn from_values(values: [f64; FIELD_COUNT]) -> Self {
        let mut vector = Self::default();
        for field in Field::ALL {
            vector.set(field, values[field.index()]);
        }
        vector
    }

    /// Current value of a field.
    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    /// Store a value after clamping. Returns the stored value, or `None` when
    /// the input was rejected and the field kept its previous value.
    pub fn set(&mut self, field: Field, value: f64) -> Option<f64> {
        let clamped = field.spec().clamp(value)?;
        self.values[field.index()] = clamped;
        Some(clamped)
    }

    /// Values in model feature order.
    pub fn as_array(&self) -> [f64; FIELD_COUNT] {
        self.values
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value:?}")?;
        }
        write!(f, "]")
    }
}

//! Patient record types for heart-disease risk prediction.
//!
//! The record mirrors the data-entry form: eleven clinical measurements, each
//! starting at a sentinel that means "not yet entered". Numeric fields use `0`
//! as their sentinel, categorical fields use `None` (shown as [`PLACEHOLDER`]).
//! Oldpeak has no sentinel: its default of `0.0` is a legitimate measurement.

/// Text shown for a categorical field that has no selection yet.
pub const PLACEHOLDER: &str = "Select...";

const OLDPEAK_MIN: f64 = -10.0;
const OLDPEAK_MAX: f64 = 10.0;
const OLDPEAK_STEP: f64 = 0.5;

/// Identifies one of the eleven inputs, in training-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Age,
    Sex,
    ChestPain,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    ExerciseAngina,
    Oldpeak,
    StSlope,
}

/// How a field is edited and what its sentinel looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole number in `0..=max`; `0` means unset.
    Integer { max: u16 },
    /// Signed decimal; never unset.
    Decimal { min: f64, max: f64, step: f64 },
    /// One of a fixed list of options; `None` means unset.
    Choice,
}

impl Field {
    /// All fields in the column order the classifier was trained on.
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::Sex,
        Field::ChestPain,
        Field::RestingBp,
        Field::Cholesterol,
        Field::FastingBs,
        Field::RestingEcg,
        Field::MaxHr,
        Field::ExerciseAngina,
        Field::Oldpeak,
        Field::StSlope,
    ];

    /// Position of this field in the encoded feature vector.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the training dataset.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPain => "ChestPainType",
            Self::RestingBp => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "FastingBS",
            Self::RestingEcg => "RestingECG",
            Self::MaxHr => "MaxHR",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST_Slope",
        }
    }

    /// Question shown next to the input.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Age => "Age:",
            Self::Sex => "Gender:",
            Self::ChestPain => "Is the patient experiencing chest pain?",
            Self::RestingBp => "Resting BP (mm Hg):",
            Self::Cholesterol => "Cholesterol (mm/dl):",
            Self::FastingBs => "Is the patient fasting?",
            Self::RestingEcg => "Resting ECG results:",
            Self::MaxHr => "Maximum heart-rate achieved:",
            Self::ExerciseAngina => "Does the patient have exercise-induced angina?",
            Self::Oldpeak => "Oldpeak:",
            Self::StSlope => "ST Slope:",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Integer { max: 99 },
            Self::RestingBp | Self::Cholesterol | Self::MaxHr => FieldKind::Integer { max: 999 },
            Self::Oldpeak => FieldKind::Decimal {
                min: OLDPEAK_MIN,
                max: OLDPEAK_MAX,
                step: OLDPEAK_STEP,
            },
            Self::Sex
            | Self::ChestPain
            | Self::FastingBs
            | Self::RestingEcg
            | Self::ExerciseAngina
            | Self::StSlope => FieldKind::Choice,
        }
    }

    /// Option labels for categorical fields, in display order. Empty for numeric fields.
    #[must_use]
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Sex => Sex::LABELS,
            Self::ChestPain => ChestPain::LABELS,
            Self::FastingBs | Self::ExerciseAngina => YesNo::LABELS,
            Self::RestingEcg => RestingEcg::LABELS,
            Self::StSlope => StSlope::LABELS,
            _ => &[],
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// A categorical input with a fixed label table and training-data code.
pub trait Categorical: Sized + Copy + PartialEq + 'static {
    /// Variants in display order.
    const VARIANTS: &'static [Self];
    /// Labels in the same order as `VARIANTS`.
    const LABELS: &'static [&'static str];

    /// Integer code used in the training dataset.
    fn code(self) -> u8;

    fn label(self) -> &'static str {
        let idx = Self::VARIANTS
            .iter()
            .position(|v| *v == self)
            .unwrap_or_default();
        Self::LABELS[idx]
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .position(|l| *l == label)
            .map(|idx| Self::VARIANTS[idx])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Categorical for Sex {
    const VARIANTS: &'static [Self] = &[Self::Male, Self::Female];
    const LABELS: &'static [&'static str] = &["Male", "Female"];

    fn code(self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestPain {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl Categorical for ChestPain {
    const VARIANTS: &'static [Self] = &[
        Self::TypicalAngina,
        Self::AtypicalAngina,
        Self::NonAnginalPain,
        Self::Asymptomatic,
    ];
    const LABELS: &'static [&'static str] = &[
        "Typical Angina",
        "Atypical Angina",
        "Non-Anginal Pain",
        "Asymptomatic",
    ];

    fn code(self) -> u8 {
        match self {
            Self::TypicalAngina => 0,
            Self::AtypicalAngina => 1,
            Self::NonAnginalPain => 2,
            Self::Asymptomatic => 3,
        }
    }
}

/// Answer to a yes/no question (fasting blood sugar, exercise-induced angina).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl Categorical for YesNo {
    const VARIANTS: &'static [Self] = &[Self::Yes, Self::No];
    const LABELS: &'static [&'static str] = &["Yes", "No"];

    fn code(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

impl Categorical for RestingEcg {
    const VARIANTS: &'static [Self] = &[
        Self::Normal,
        Self::StTAbnormality,
        Self::LeftVentricularHypertrophy,
    ];
    const LABELS: &'static [&'static str] = &[
        "Normal",
        "ST-T Wave Abnormality",
        "Probable Left Ventricular Hypertrophy",
    ];

    fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::StTAbnormality => 1,
            Self::LeftVentricularHypertrophy => 2,
        }
    }
}

/// Slope of the peak exercise ST segment.
///
/// Codes follow the dataset: Up-sloping=1, Flat=0, Down-sloping=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StSlope {
    UpSloping,
    Flat,
    DownSloping,
}

impl Categorical for StSlope {
    const VARIANTS: &'static [Self] = &[Self::UpSloping, Self::Flat, Self::DownSloping];
    const LABELS: &'static [&'static str] = &["Up-sloping", "Flat", "Down-sloping"];

    fn code(self) -> u8 {
        match self {
            Self::Flat => 0,
            Self::UpSloping => 1,
            Self::DownSloping => 2,
        }
    }
}

/// Error raised when the form tries to store a value the field cannot hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{field}: value {value} must be between {min} and {max}")]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: unknown option {label:?}")]
    UnknownOption { field: Field, label: String },

    #[error("{field}: expected a {expected} field")]
    WrongKind { field: Field, expected: &'static str },
}

/// Current contents of the data-entry form.
///
/// `Default` yields the all-sentinel record shown when the form first opens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientRecord {
    /// Age in years (0-99)
    pub age: u16,
    pub sex: Option<Sex>,
    pub chest_pain: Option<ChestPain>,
    /// Resting blood pressure in mm Hg
    pub resting_bp: u16,
    /// Serum cholesterol in mm/dl
    pub cholesterol: u16,
    /// Fasting blood sugar > 120 mg/dl
    pub fasting_bs: Option<YesNo>,
    pub resting_ecg: Option<RestingEcg>,
    /// Maximum heart rate achieved
    pub max_hr: u16,
    pub exercise_angina: Option<YesNo>,
    /// ST depression induced by exercise relative to rest (-10.0 to 10.0)
    pub oldpeak: f64,
    pub st_slope: Option<StSlope>,
}

impl PatientRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put every field back to its sentinel, including oldpeak to `0.0`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `field` still holds its "not yet entered" sentinel.
    ///
    /// A genuine zero for age, blood pressure, cholesterol or heart rate is
    /// indistinguishable from unset. Oldpeak is never unset.
    #[must_use]
    pub fn is_unset(&self, field: Field) -> bool {
        match field {
            Field::Age => self.age == 0,
            Field::Sex => self.sex.is_none(),
            Field::ChestPain => self.chest_pain.is_none(),
            Field::RestingBp => self.resting_bp == 0,
            Field::Cholesterol => self.cholesterol == 0,
            Field::FastingBs => self.fasting_bs.is_none(),
            Field::RestingEcg => self.resting_ecg.is_none(),
            Field::MaxHr => self.max_hr == 0,
            Field::ExerciseAngina => self.exercise_angina.is_none(),
            Field::Oldpeak => false,
            Field::StSlope => self.st_slope.is_none(),
        }
    }

    /// Integer value of a whole-number field, `None` for other kinds.
    #[must_use]
    pub fn integer(&self, field: Field) -> Option<u16> {
        match field {
            Field::Age => Some(self.age),
            Field::RestingBp => Some(self.resting_bp),
            Field::Cholesterol => Some(self.cholesterol),
            Field::MaxHr => Some(self.max_hr),
            _ => None,
        }
    }

    /// Selected option label of a categorical field (`None` while unset or for numeric fields).
    #[must_use]
    pub fn selection(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Sex => self.sex.map(Categorical::label),
            Field::ChestPain => self.chest_pain.map(Categorical::label),
            Field::FastingBs => self.fasting_bs.map(Categorical::label),
            Field::RestingEcg => self.resting_ecg.map(Categorical::label),
            Field::ExerciseAngina => self.exercise_angina.map(Categorical::label),
            Field::StSlope => self.st_slope.map(Categorical::label),
            _ => None,
        }
    }

    /// Text the form shows for `field`, sentinels included.
    #[must_use]
    pub fn display_value(&self, field: Field) -> String {
        match field.kind() {
            FieldKind::Integer { .. } => self.integer(field).unwrap_or_default().to_string(),
            FieldKind::Decimal { .. } => format!("{:.1}", self.oldpeak),
            FieldKind::Choice => self.selection(field).unwrap_or(PLACEHOLDER).to_string(),
        }
    }

    /// Store a whole-number value.
    ///
    /// # Errors
    /// Returns `FormError` if the field is not an integer field or the value exceeds its range.
    pub fn set_integer(&mut self, field: Field, value: u16) -> Result<(), FormError> {
        let FieldKind::Integer { max } = field.kind() else {
            return Err(FormError::WrongKind {
                field,
                expected: "whole-number",
            });
        };
        if value > max {
            return Err(FormError::OutOfRange {
                field,
                value: f64::from(value),
                min: 0.0,
                max: f64::from(max),
            });
        }

        if let Some(slot) = self.integer_mut(field) {
            *slot = value;
        }
        Ok(())
    }

    fn integer_mut(&mut self, field: Field) -> Option<&mut u16> {
        match field {
            Field::Age => Some(&mut self.age),
            Field::RestingBp => Some(&mut self.resting_bp),
            Field::Cholesterol => Some(&mut self.cholesterol),
            Field::MaxHr => Some(&mut self.max_hr),
            _ => None,
        }
    }

    /// Store the oldpeak (ST depression) value.
    ///
    /// # Errors
    /// Returns `FormError::OutOfRange` if the value is not finite or outside -10.0..=10.0.
    pub fn set_oldpeak(&mut self, value: f64) -> Result<(), FormError> {
        if !value.is_finite() || !(OLDPEAK_MIN..=OLDPEAK_MAX).contains(&value) {
            return Err(FormError::OutOfRange {
                field: Field::Oldpeak,
                value,
                min: OLDPEAK_MIN,
                max: OLDPEAK_MAX,
            });
        }
        self.oldpeak = value;
        Ok(())
    }

    /// Select a categorical option by its label.
    ///
    /// # Errors
    /// Returns `FormError` if the field is not categorical or the label is not one of its options.
    pub fn select(&mut self, field: Field, label: &str) -> Result<(), FormError> {
        let unknown = || FormError::UnknownOption {
            field,
            label: label.to_string(),
        };
        match field {
            Field::Sex => self.sex = Some(Sex::from_label(label).ok_or_else(unknown)?),
            Field::ChestPain => {
                self.chest_pain = Some(ChestPain::from_label(label).ok_or_else(unknown)?);
            }
            Field::FastingBs => self.fasting_bs = Some(YesNo::from_label(label).ok_or_else(unknown)?),
            Field::RestingEcg => {
                self.resting_ecg = Some(RestingEcg::from_label(label).ok_or_else(unknown)?);
            }
            Field::ExerciseAngina => {
                self.exercise_angina = Some(YesNo::from_label(label).ok_or_else(unknown)?);
            }
            Field::StSlope => self.st_slope = Some(StSlope::from_label(label).ok_or_else(unknown)?),
            _ => {
                return Err(FormError::WrongKind {
                    field,
                    expected: "categorical",
                })
            }
        }
        Ok(())
    }

    /// Put a single field back to its sentinel.
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Age => self.age = 0,
            Field::Sex => self.sex = None,
            Field::ChestPain => self.chest_pain = None,
            Field::RestingBp => self.resting_bp = 0,
            Field::Cholesterol => self.cholesterol = 0,
            Field::FastingBs => self.fasting_bs = None,
            Field::RestingEcg => self.resting_ecg = None,
            Field::MaxHr => self.max_hr = 0,
            Field::ExerciseAngina => self.exercise_angina = None,
            Field::Oldpeak => self.oldpeak = 0.0,
            Field::StSlope => self.st_slope = None,
        }
    }

    /// Spin-box style increment/decrement.
    ///
    /// Integers move by one and oldpeak by its step, both clamped to range.
    /// Categorical fields cycle through their options; stepping from the
    /// placeholder lands on the first (or last) option.
    pub fn step(&mut self, field: Field, forward: bool) {
        match field.kind() {
            FieldKind::Integer { max } => {
                if let Some(slot) = self.integer_mut(field) {
                    *slot = if forward {
                        slot.saturating_add(1).min(max)
                    } else {
                        slot.saturating_sub(1)
                    };
                }
            }
            FieldKind::Decimal { min, max, step } => {
                let next = if forward {
                    self.oldpeak + step
                } else {
                    self.oldpeak - step
                };
                self.oldpeak = next.clamp(min, max);
            }
            FieldKind::Choice => match field {
                Field::Sex => self.sex = cycle(self.sex, forward),
                Field::ChestPain => self.chest_pain = cycle(self.chest_pain, forward),
                Field::FastingBs => self.fasting_bs = cycle(self.fasting_bs, forward),
                Field::RestingEcg => self.resting_ecg = cycle(self.resting_ecg, forward),
                Field::ExerciseAngina => self.exercise_angina = cycle(self.exercise_angina, forward),
                Field::StSlope => self.st_slope = cycle(self.st_slope, forward),
                _ => {}
            },
        }
    }
}

fn cycle<T: Categorical>(current: Option<T>, forward: bool) -> Option<T> {
    let n = T::VARIANTS.len();
    let next = match current.and_then(|c| T::VARIANTS.iter().position(|v| *v == c)) {
        None if forward => 0,
        None => n - 1,
        Some(i) if forward => (i + 1) % n,
        Some(i) => (i + n - 1) % n,
    };
    Some(T::VARIANTS[next])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_all_sentinels() {
        let record = PatientRecord::new();
        for field in Field::ALL {
            if field == Field::Oldpeak {
                assert!(!record.is_unset(field));
            } else {
                assert!(record.is_unset(field), "{field} should start unset");
            }
        }
        assert_eq!(record.display_value(Field::Sex), PLACEHOLDER);
        assert_eq!(record.display_value(Field::Age), "0");
        assert_eq!(record.display_value(Field::Oldpeak), "0.0");
    }

    #[test]
    fn test_field_order_matches_columns() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        assert_eq!(Field::StSlope.column(), "ST_Slope");
    }

    #[test]
    fn test_select_by_label() {
        let mut record = PatientRecord::new();
        record.select(Field::Sex, "Female").expect("valid option");
        record
            .select(Field::RestingEcg, "Probable Left Ventricular Hypertrophy")
            .expect("valid option");
        record.select(Field::ExerciseAngina, "No").expect("valid option");

        assert_eq!(record.sex, Some(Sex::Female));
        assert_eq!(record.resting_ecg, Some(RestingEcg::LeftVentricularHypertrophy));
        assert_eq!(record.exercise_angina, Some(YesNo::No));
    }

    #[test]
    fn test_select_rejects_placeholder_and_numeric_fields() {
        let mut record = PatientRecord::new();
        assert!(matches!(
            record.select(Field::Sex, PLACEHOLDER),
            Err(FormError::UnknownOption { .. })
        ));
        assert!(matches!(
            record.select(Field::Age, "Male"),
            Err(FormError::WrongKind { .. })
        ));
        assert!(record.sex.is_none());
    }

    #[test]
    fn test_set_integer_range() {
        let mut record = PatientRecord::new();
        record.set_integer(Field::Age, 63).expect("in range");
        assert_eq!(record.age, 63);

        assert!(record.set_integer(Field::Age, 100).is_err());
        assert_eq!(record.age, 63);

        record.set_integer(Field::Cholesterol, 999).expect("in range");
        assert!(record.set_integer(Field::Cholesterol, 1000).is_err());
        assert!(record.set_integer(Field::Sex, 1).is_err());
    }

    #[test]
    fn test_set_oldpeak_range() {
        let mut record = PatientRecord::new();
        record.set_oldpeak(2.3).expect("in range");
        assert!((record.oldpeak - 2.3).abs() < f64::EPSILON);
        record.set_oldpeak(-10.0).expect("lower bound");
        assert!(record.set_oldpeak(10.5).is_err());
        assert!(record.set_oldpeak(f64::NAN).is_err());
        assert!((record.oldpeak + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_is_unset_for_integers() {
        let mut record = PatientRecord::new();
        record.set_integer(Field::MaxHr, 150).expect("in range");
        assert!(!record.is_unset(Field::MaxHr));
        record.set_integer(Field::MaxHr, 0).expect("in range");
        assert!(record.is_unset(Field::MaxHr));
    }

    #[test]
    fn test_step_cycles_choices() {
        let mut record = PatientRecord::new();
        record.step(Field::StSlope, true);
        assert_eq!(record.st_slope, Some(StSlope::UpSloping));
        record.step(Field::StSlope, true);
        record.step(Field::StSlope, true);
        assert_eq!(record.st_slope, Some(StSlope::DownSloping));
        record.step(Field::StSlope, true);
        assert_eq!(record.st_slope, Some(StSlope::UpSloping));

        let mut record = PatientRecord::new();
        record.step(Field::Sex, false);
        assert_eq!(record.sex, Some(Sex::Female));
    }

    #[test]
    fn test_step_numeric_clamps() {
        let mut record = PatientRecord::new();
        record.step(Field::Age, false);
        assert_eq!(record.age, 0);
        record.set_integer(Field::Age, 99).expect("in range");
        record.step(Field::Age, true);
        assert_eq!(record.age, 99);

        record.step(Field::Oldpeak, true);
        assert!((record.oldpeak - 0.5).abs() < f64::EPSILON);
        record.set_oldpeak(-10.0).expect("in range");
        record.step(Field::Oldpeak, false);
        assert!((record.oldpeak + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_step_walks_every_integer_field() {
        let mut record = PatientRecord::new();
        for field in [Field::Age, Field::RestingBp, Field::Cholesterol, Field::MaxHr] {
            record.step(field, true);
            record.step(field, true);
            assert_eq!(record.integer(field), Some(2), "{field}");
            record.step(field, false);
            assert_eq!(record.integer(field), Some(1), "{field}");
        }

        record.set_integer(Field::MaxHr, 999).expect("in range");
        record.step(Field::MaxHr, true);
        assert_eq!(record.max_hr, 999);
        record.step(Field::MaxHr, false);
        assert_eq!(record.max_hr, 998);
    }

    #[test]
    fn test_reset_restores_sentinels() {
        let mut record = PatientRecord::new();
        record.set_integer(Field::Age, 40).expect("in range");
        record.select(Field::ChestPain, "Asymptomatic").expect("valid option");
        record.set_oldpeak(1.5).expect("in range");

        record.reset();
        assert_eq!(record, PatientRecord::default());
        assert!(record.oldpeak.abs() < f64::EPSILON);
    }

    #[test]
    fn test_slope_codes_follow_dataset() {
        assert_eq!(StSlope::Flat.code(), 0);
        assert_eq!(StSlope::UpSloping.code(), 1);
        assert_eq!(StSlope::DownSloping.code(), 2);
        assert_eq!(StSlope::from_label("Flat"), Some(StSlope::Flat));
    }
}

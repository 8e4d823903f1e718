use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::model::Money;

pub const REQUIRED: &str = "Este campo es obligatorio.";
pub const INVALID_DATE: &str = "Introduzca una fecha válida.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { max_length: usize },
    TextArea,
    Money,
    Date,
    /// Set of primary keys picked from the form's choices.
    MultipleChoice,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: i64,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: i64, label: String) -> Self {
        Self { value, label }
    }
}

pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// Submitted key/value pairs. Repeated keys are kept, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        FormData(pairs)
    }
}

impl FormData {
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.0.push((name.to_string(), value.into()));
    }

    /// Last value submitted under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Collects cleaned values and errors field by field.
///
/// Every method returns `None` only after recording an error for that field,
/// so once [`Cleaner::is_valid`] holds all returned values are `Some`.
pub struct Cleaner<'a> {
    data: &'a FormData,
    choices: &'a [Choice],
    errors: FieldErrors,
}

impl<'a> Cleaner<'a> {
    #[must_use]
    pub fn new(data: &'a FormData, choices: &'a [Choice]) -> Self {
        Self {
            data,
            choices,
            errors: FieldErrors::new(),
        }
    }

    fn error(&mut self, spec: &FieldSpec, message: impl Into<String>) {
        self.errors.entry(spec.name).or_default().push(message.into());
    }

    fn raw(&self, spec: &FieldSpec) -> &'a str {
        self.data.get(spec.name).map_or("", str::trim)
    }

    pub fn text(&mut self, spec: &FieldSpec) -> Option<String> {
        let value = self.raw(spec);
        if value.is_empty() && spec.required {
            self.error(spec, REQUIRED);
            return None;
        }
        if let FieldKind::Text { max_length } = spec.kind {
            let len = value.chars().count();
            if len > max_length {
                self.error(
                    spec,
                    format!(
                        "Asegúrese de que este valor tenga menos de {max_length} caracteres (tiene {len})."
                    ),
                );
                return None;
            }
        }
        Some(value.to_string())
    }

    pub fn money(&mut self, spec: &FieldSpec) -> Option<Money> {
        let value = self.raw(spec);
        if value.is_empty() {
            if spec.required {
                self.error(spec, REQUIRED);
                return None;
            }
            return Some(Money::default());
        }
        match Money::parse(value) {
            Ok(money) => Some(money),
            Err(message) => {
                self.error(spec, message);
                None
            }
        }
    }

    /// Accepts `YYYY-MM-DD` (what `<input type="date">` submits) and `DD/MM/YYYY`.
    pub fn date(&mut self, spec: &FieldSpec) -> Option<NaiveDate> {
        let value = self.raw(spec);
        if value.is_empty() {
            self.error(spec, REQUIRED);
            return None;
        }
        let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"));
        match parsed {
            Ok(date) => Some(date),
            Err(_) => {
                self.error(spec, INVALID_DATE);
                None
            }
        }
    }

    /// Picked primary keys, deduplicated, in submission order. Each must be
    /// one of the choices.
    pub fn choices(&mut self, spec: &FieldSpec) -> Option<Vec<i64>> {
        let picked: Vec<&str> = self
            .data
            .get_all(spec.name)
            .into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        if picked.is_empty() && spec.required {
            self.error(spec, REQUIRED);
            return None;
        }

        let mut ids = Vec::with_capacity(picked.len());
        for raw in picked {
            let known = raw
                .parse::<i64>()
                .ok()
                .filter(|id| self.choices.iter().any(|c| c.value == *id));
            match known {
                Some(id) => {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                None => {
                    self.error(
                        spec,
                        format!(
                            "Escoja una opción válida. {raw} no es una de las opciones disponibles."
                        ),
                    );
                    return None;
                }
            }
        }
        Some(ids)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// A field with the values and errors to render.
#[derive(Debug, Clone)]
pub struct BoundField {
    pub spec: &'static FieldSpec,
    pub values: Vec<String>,
    pub choices: Vec<Choice>,
    pub errors: Vec<String>,
}

impl BoundField {
    #[must_use]
    pub fn value(&self) -> &str {
        self.values.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_selected(&self, choice: &Choice) -> bool {
        let wanted = choice.value.to_string();
        self.values.iter().any(|v| v.trim() == wanted)
    }
}

#[derive(Debug, Clone)]
pub struct BoundForm {
    pub fields: Vec<BoundField>,
}

impl BoundForm {
    #[must_use]
    pub fn new(
        specs: &'static [FieldSpec],
        data: &FormData,
        choices: &[Choice],
        errors: &FieldErrors,
    ) -> Self {
        let fields = specs
            .iter()
            .map(|spec| BoundField {
                spec,
                values: data
                    .get_all(spec.name)
                    .into_iter()
                    .map(ToString::to_string)
                    .collect(),
                choices: match spec.kind {
                    FieldKind::MultipleChoice => choices.to_vec(),
                    _ => Vec::new(),
                },
                errors: errors.get(spec.name).cloned().unwrap_or_default(),
            })
            .collect();
        Self { fields }
    }

    #[must_use]
    pub fn unbound(specs: &'static [FieldSpec], choices: &[Choice]) -> Self {
        Self::new(specs, &FormData::default(), choices, &FieldErrors::new())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| !f.errors.is_empty())
    }
}

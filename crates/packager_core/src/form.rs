use std::collections::BTreeMap;

use crate::field::{validate, Field, ValidationError};
use crate::ConvertRequest;

/// Which fields a form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVariant {
    UrlOnly,
    #[default]
    WithAppName,
}

impl FormVariant {
    pub fn fields(self) -> &'static [Field] {
        match self {
            FormVariant::UrlOnly => &[Field::Url],
            FormVariant::WithAppName => &[Field::Url, Field::AppName],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSlot {
    value: String,
    error: Option<ValidationError>,
    touched: bool,
}

impl FieldSlot {
    fn new(field: Field) -> Self {
        let value = String::new();
        let error = validate(field, &value).err();
        Self {
            value,
            error,
            touched: false,
        }
    }
}

/// Field values, their current validity, and whether the user has touched them.
///
/// Errors are recomputed whenever a value changes, so they never go stale.
/// An untouched field still carries its computed error; it is only hidden
/// from display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    slots: BTreeMap<Field, FieldSlot>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FormVariant::default())
    }
}

impl FormState {
    pub fn new(variant: FormVariant) -> Self {
        let slots = variant
            .fields()
            .iter()
            .map(|&field| (field, FieldSlot::new(field)))
            .collect();
        Self { slots }
    }

    pub fn collects(&self, field: Field) -> bool {
        self.slots.contains_key(&field)
    }

    /// Current value; empty for fields this variant does not collect.
    pub fn value(&self, field: Field) -> &str {
        self.slots
            .get(&field)
            .map(|slot| slot.value.as_str())
            .unwrap_or("")
    }

    pub fn error(&self, field: Field) -> Option<ValidationError> {
        self.slots.get(&field).and_then(|slot| slot.error)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.slots.get(&field).is_some_and(|slot| slot.touched)
    }

    /// The error message to show, if the field is touched and invalid.
    pub fn displayed_error(&self, field: Field) -> Option<&'static str> {
        let slot = self.slots.get(&field)?;
        if !slot.touched {
            return None;
        }
        slot.error.map(|error| error.message(field))
    }

    /// Stores `value`, marks the field touched and revalidates it.
    ///
    /// Returns `false` when the field is not part of this form.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let Some(slot) = self.slots.get_mut(&field) else {
            return false;
        };
        slot.value = value.into();
        slot.touched = true;
        slot.error = validate(field, &slot.value).err();
        true
    }

    /// Marks the field touched without changing its value.
    pub fn touch(&mut self, field: Field) -> bool {
        let Some(slot) = self.slots.get_mut(&field) else {
            return false;
        };
        slot.touched = true;
        slot.error = validate(field, &slot.value).err();
        true
    }

    /// Revalidates every field regardless of touched state.
    ///
    /// Failing fields are marked touched so their errors become visible.
    /// Returns `true` when every field passes.
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for (&field, slot) in &mut self.slots {
            slot.error = validate(field, &slot.value).err();
            if slot.error.is_some() {
                slot.touched = true;
                all_valid = false;
            }
        }
        all_valid
    }

    pub fn to_request(&self) -> ConvertRequest {
        ConvertRequest {
            url: self.value(Field::Url).to_string(),
            app_name: self
                .collects(Field::AppName)
                .then(|| self.value(Field::AppName).to_string()),
        }
    }
}

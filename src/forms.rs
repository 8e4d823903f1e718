//! Form field declarations, validation and binding.
//!
//! Each entity declares its editable fields as a static [`FieldSpec`] list and
//! implements [`ModelForm`] to turn submitted [`FormData`] into its typed
//! input. Validation failures come back as [`FieldErrors`] so the form can be
//! re-rendered with per-field messages.

pub mod fields;
mod product;
mod shipment;

pub use fields::{
    BoundField, BoundForm, Choice, Cleaner, FieldErrors, FieldKind, FieldSpec, FormData,
};

use crate::model::{Entity, WithRelated};

pub trait ModelForm: Entity {
    const FIELDS: &'static [FieldSpec];

    /// Form values for editing an existing record.
    fn initial(item: &WithRelated<Self>) -> FormData;

    /// # Errors
    ///
    /// Will return `Err` with one or more messages per offending field if the
    /// submission does not validate
    fn clean(data: &FormData, choices: &[Choice]) -> Result<Self::Input, FieldErrors>;
}

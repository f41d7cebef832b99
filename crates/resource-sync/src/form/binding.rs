//! Binding between a record type and its form.

use super::schema::FormSchema;
use super::state::FormModel;
use crate::entity::SyncEntity;

/// A record that can be created and edited through a form.
///
/// The conversions are only called on a model that passed the submission gate, but they
/// may still fail (an optional numeric field holding text, say). The message ends up in
/// [`MutationError::InvalidPayload`](crate::error::MutationError::InvalidPayload).
pub trait FormEntity: SyncEntity {
    fn schema() -> FormSchema;

    fn create_params(model: &FormModel) -> Result<Self::Create, String>;

    fn update_params(model: &FormModel) -> Result<Self::Update, String>;

    /// Field values to load into the form when editing this record.
    fn form_values(&self) -> Vec<(&'static str, String)>;
}

//! Field identifiers and the registry describing how each field behaves.

use crate::mask::MaskKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every text field on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Name,
    Email,
    UserId,
    Password,
    ConfirmPassword,
    BirthDate,
    Cpf,
    Phone,
    Cep,
    Street,
    Number,
    Neighborhood,
    City,
    State,
}

impl FieldId {
    pub const ALL: [FieldId; 14] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::UserId,
        FieldId::Password,
        FieldId::ConfirmPassword,
        FieldId::BirthDate,
        FieldId::Cpf,
        FieldId::Phone,
        FieldId::Cep,
        FieldId::Street,
        FieldId::Number,
        FieldId::Neighborhood,
        FieldId::City,
        FieldId::State,
    ];

    /// Key used for this field in saved drafts.
    pub fn key(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::UserId => "userId",
            FieldId::Password => "password",
            FieldId::ConfirmPassword => "confirmPassword",
            FieldId::BirthDate => "birthDate",
            FieldId::Cpf => "cpf",
            FieldId::Phone => "phone",
            FieldId::Cep => "cep",
            FieldId::Street => "street",
            FieldId::Number => "number",
            FieldId::Neighborhood => "neighborhood",
            FieldId::City => "city",
            FieldId::State => "state",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Validation applied when a field loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    None,
    Email,
    Password,
    PasswordConfirmation,
    BirthDate,
    Cpf,
    /// Length check followed by an address lookup.
    Cep,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub rule: Rule,
    pub mask: Option<MaskKind>,
    pub required: bool,
}

impl FieldDescriptor {
    fn new(id: FieldId, rule: Rule) -> Self {
        Self {
            id,
            rule,
            mask: None,
            required: true,
        }
    }

    fn masked(mut self, mask: MaskKind) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Field descriptors plus the selectable tracks, built once at start-up.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    tracks: Vec<String>,
}

impl FieldRegistry {
    /// The registration form as shipped: every text field is required.
    pub fn standard(tracks: Vec<String>) -> Self {
        let fields = vec![
            FieldDescriptor::new(FieldId::Name, Rule::None),
            FieldDescriptor::new(FieldId::Email, Rule::Email),
            FieldDescriptor::new(FieldId::UserId, Rule::None),
            FieldDescriptor::new(FieldId::Password, Rule::Password),
            FieldDescriptor::new(FieldId::ConfirmPassword, Rule::PasswordConfirmation),
            FieldDescriptor::new(FieldId::BirthDate, Rule::BirthDate).masked(MaskKind::Date),
            FieldDescriptor::new(FieldId::Cpf, Rule::Cpf).masked(MaskKind::Cpf),
            FieldDescriptor::new(FieldId::Phone, Rule::None).masked(MaskKind::Phone),
            FieldDescriptor::new(FieldId::Cep, Rule::Cep),
            FieldDescriptor::new(FieldId::Street, Rule::None),
            FieldDescriptor::new(FieldId::Number, Rule::None),
            FieldDescriptor::new(FieldId::Neighborhood, Rule::None),
            FieldDescriptor::new(FieldId::City, Rule::None),
            FieldDescriptor::new(FieldId::State, Rule::None),
        ];

        Self { fields, tracks }
    }

    pub fn descriptor(&self, id: FieldId) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|d| d.id == id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    pub fn is_track(&self, value: &str) -> bool {
        self.tracks.iter().any(|t| t == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for id in FieldId::ALL {
            assert_eq!(FieldId::from_key(id.key()), Some(id));
        }
        assert_eq!(FieldId::from_key("track"), None);
    }

    #[test]
    fn test_serde_name_matches_key() {
        for id in FieldId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.key()));
        }
    }

    #[test]
    fn test_standard_registry_covers_all_fields() {
        let registry = FieldRegistry::standard(vec!["backend".into()]);
        for id in FieldId::ALL {
            let desc = registry.descriptor(id).unwrap();
            assert!(desc.required);
        }
        assert_eq!(
            registry.descriptor(FieldId::Cpf).unwrap().mask,
            Some(MaskKind::Cpf)
        );
        assert!(registry.is_track("backend"));
        assert!(!registry.is_track("frontend"));
    }
}

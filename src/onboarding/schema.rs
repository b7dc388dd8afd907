use std::collections::HashMap;

use anyhow::bail;
use serde::Serialize;
use serde_json::Value;

/// Kind of input a form field renders as, and the value shape it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "multiline-text")]
    MultilineText,
    #[serde(rename = "yes-no")]
    YesNo,
}

impl FieldKind {
    /// Whether a submitted JSON value has the right shape for this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text | FieldKind::MultilineText => value.is_string(),
            FieldKind::YesNo => value.is_boolean(),
        }
    }

    /// Human name of the expected shape, used in validation messages.
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::MultilineText => "string",
            FieldKind::YesNo => "boolean",
        }
    }
}

/// One question of the onboarding form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    // The original wire format omits the key on optional fields.
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// The fixed two-step form presented to new users.
fn onboarding_steps() -> Vec<Vec<FieldDescriptor>> {
    vec![
        vec![
            FieldDescriptor {
                name: "firstName",
                label: "First Name",
                kind: FieldKind::Text,
                required: true,
            },
            FieldDescriptor {
                name: "lastName",
                label: "Last Name",
                kind: FieldKind::Text,
                required: false,
            },
            FieldDescriptor {
                name: "bio",
                label: "Bio",
                kind: FieldKind::MultilineText,
                required: false,
            },
        ],
        vec![
            FieldDescriptor {
                name: "country",
                label: "Country",
                kind: FieldKind::Text,
                required: true,
            },
            FieldDescriptor {
                name: "receiveNotifications",
                label: "I would like to receive email notifications for new messages when I'm logged out",
                kind: FieldKind::YesNo,
                required: true,
            },
            FieldDescriptor {
                name: "receiveUpdates",
                label: "I would like to receive updates about the product via email",
                kind: FieldKind::YesNo,
                required: true,
            },
        ],
    ]
}

/// The ordered form steps plus a name index for validation lookups.
///
/// Built once at startup and shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct OnboardingSchema {
    steps: Vec<Vec<FieldDescriptor>>,
    by_name: HashMap<&'static str, FieldDescriptor>,
}

impl OnboardingSchema {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_steps(onboarding_steps())
    }

    /// Field names must be unique across all steps, or the name index
    /// would silently drop a descriptor.
    pub fn from_steps(steps: Vec<Vec<FieldDescriptor>>) -> anyhow::Result<Self> {
        let mut by_name = HashMap::new();
        for field in steps.iter().flatten() {
            if by_name.insert(field.name, *field).is_some() {
                bail!("duplicate onboarding field name: {}", field.name);
            }
        }
        Ok(Self { steps, by_name })
    }

    pub fn steps(&self) -> &[Vec<FieldDescriptor>] {
        &self.steps
    }

    pub fn lookup(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name)
    }
}

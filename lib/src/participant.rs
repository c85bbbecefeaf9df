use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// An addressable group member. The identifier is an opaque platform token
/// (for example `628123456789@s.whatsapp.net`) and is never rewritten.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    #[serde(alias = "id")]
    pub identifier: String,
}

impl Participant {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "participants")]
    pub participant_count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub identifier: String,
    pub phone_number: Option<String>,
}

impl From<&Participant> for Contact {
    fn from(participant: &Participant) -> Self {
        Self {
            identifier: participant.identifier.clone(),
            phone_number: phone_number(&participant.identifier),
        }
    }
}

fn phone_number(identifier: &str) -> Option<String> {
    static USER_JID: OnceLock<Option<Regex>> = OnceLock::new();

    USER_JID
        .get_or_init(|| Regex::new(r"^(\d{5,15})(?::\d+)?@(?:s\.whatsapp\.net|c\.us)$").ok())
        .as_ref()
        .and_then(|regex| regex.captures(identifier))
        .and_then(|captures| captures.get(1))
        .map(|number| number.as_str().to_string())
}

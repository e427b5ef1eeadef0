use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Sentinel written for `ExpectedOutcome::ErrorExpected`
pub const ERROR_EXPECTED: &str = "error expected";

/// What a step expects the service to answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExpectedRepr", into = "ExpectedRepr")]
pub enum ExpectedOutcome {
    ExactStatus(u16),
    AnyOf(BTreeSet<u16>),
    /// Non-2xx status, or a body that reports an error
    ErrorExpected,
}

impl ExpectedOutcome {
    pub fn any_of(codes: impl IntoIterator<Item = u16>) -> Self {
        Self::AnyOf(codes.into_iter().collect())
    }

    pub fn matches(&self, status: u16, body: &str) -> bool {
        match self {
            Self::ExactStatus(code) => status == *code,
            Self::AnyOf(codes) => codes.contains(&status),
            Self::ErrorExpected => {
                if !(200..300).contains(&status) {
                    return true;
                }
                // The service answers some bad requests with 200 and an error message
                let body = body.to_lowercase();
                body.contains("error") || body.contains("invalid")
            }
        }
    }
}

impl fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactStatus(code) => write!(f, "{}", code),
            Self::AnyOf(codes) => {
                let list: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
                write!(f, "one of [{}]", list.join(", "))
            }
            Self::ErrorExpected => f.write_str(ERROR_EXPECTED),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ExpectedRepr {
    Exact(u16),
    AnyOf(BTreeSet<u16>),
    Sentinel(String),
}

impl From<ExpectedOutcome> for ExpectedRepr {
    fn from(expected: ExpectedOutcome) -> Self {
        match expected {
            ExpectedOutcome::ExactStatus(code) => Self::Exact(code),
            ExpectedOutcome::AnyOf(codes) => Self::AnyOf(codes),
            ExpectedOutcome::ErrorExpected => Self::Sentinel(ERROR_EXPECTED.to_string()),
        }
    }
}

impl TryFrom<ExpectedRepr> for ExpectedOutcome {
    type Error = String;

    fn try_from(repr: ExpectedRepr) -> Result<Self, Self::Error> {
        match repr {
            ExpectedRepr::Exact(code) => Ok(Self::ExactStatus(code)),
            ExpectedRepr::AnyOf(codes) => Ok(Self::AnyOf(codes)),
            ExpectedRepr::Sentinel(s) if s == ERROR_EXPECTED || s == "any error" => {
                Ok(Self::ErrorExpected)
            }
            ExpectedRepr::Sentinel(s) => Err(format!("unknown expected status '{}'", s)),
        }
    }
}

/// Extra assertion on the response body
#[derive(Debug, Clone, PartialEq)]
pub enum BodyCheck {
    /// Case-insensitive substring of the body text
    Contains(String),
    /// JSON pointer into the parsed body equals `equals`
    JsonField { pointer: String, equals: Value },
}

impl BodyCheck {
    pub fn contains(needle: &str) -> Self {
        Self::Contains(needle.to_string())
    }

    pub fn json_field(pointer: &str, equals: impl Into<Value>) -> Self {
        Self::JsonField {
            pointer: pointer.to_string(),
            equals: equals.into(),
        }
    }

    pub fn passes(&self, body: &str) -> bool {
        match self {
            Self::Contains(needle) => body.to_lowercase().contains(&needle.to_lowercase()),
            Self::JsonField { pointer, equals } => serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|json| json.pointer(pointer).cloned())
                .map_or(false, |found| &found == equals),
        }
    }
}

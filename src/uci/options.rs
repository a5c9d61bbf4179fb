use crate::tt::{DEFAULT_TT_MB, MAX_TT_MB, MIN_TT_MB};

use super::UciError;

/// Side effect of a `setoption` the session must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOptionAction {
    ReinitHash(usize),
}

/// Engine options settable over UCI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UciOptions {
    pub hash_mb: usize,
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions::new(DEFAULT_TT_MB)
    }
}

impl UciOptions {
    #[must_use]
    pub fn new(hash_mb: usize) -> Self {
        UciOptions {
            hash_mb: hash_mb.clamp(MIN_TT_MB, MAX_TT_MB),
        }
    }

    /// The `option` lines announced in reply to `uci`.
    #[must_use]
    pub fn declarations(&self) -> Vec<String> {
        vec![format!(
            "option name Hash type spin default {DEFAULT_TT_MB} min {MIN_TT_MB} max {MAX_TT_MB}"
        )]
    }

    /// Apply a parsed `setoption`. Option names are case-insensitive.
    pub fn apply_setoption(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<Option<UciOptionAction>, UciError> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hash" => {
                let raw = value.ok_or_else(|| UciError::MissingOptionValue {
                    name: name.to_string(),
                })?;
                let mb = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| UciError::InvalidOptionValue {
                        name: name.to_string(),
                        value: raw.to_string(),
                    })?
                    .clamp(MIN_TT_MB as i64, MAX_TT_MB as i64) as usize;
                if mb == self.hash_mb {
                    return Ok(None);
                }
                self.hash_mb = mb;
                Ok(Some(UciOptionAction::ReinitHash(mb)))
            }
            _ => Err(UciError::UnknownOption {
                name: name.to_string(),
            }),
        }
    }
}

/// Split `setoption name <name...> [value <value...>]`.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    let (&"setoption", rest) = parts.split_first()? else {
        return None;
    };

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut in_value = None;

    for &part in rest {
        match part {
            "name" if in_value.is_none() => in_value = Some(false),
            "value" if in_value == Some(false) => in_value = Some(true),
            _ => match in_value {
                Some(false) => name_parts.push(part),
                Some(true) => value_parts.push(part),
                None => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some((name_parts.join(" "), value))
}

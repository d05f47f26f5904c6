//! Action tokens: the user-facing names of edit steps and their arguments.

use crate::{Error, Result};
use chorekit_av::actions::Edit;
use chorekit_av::QualityPreset;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Reference sample rate assumed by `tempo` when only a factor is given.
pub const DEFAULT_REFERENCE_RATE: f64 = 44_100.0;

/// The closed set of known actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Append,
    Tempo,
    Speed,
    Trim,
    Delay,
    Mute,
    Volume,
    Crop,
    Reencode,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Append,
        ActionKind::Tempo,
        ActionKind::Speed,
        ActionKind::Trim,
        ActionKind::Delay,
        ActionKind::Mute,
        ActionKind::Volume,
        ActionKind::Crop,
        ActionKind::Reencode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Append => "append",
            ActionKind::Tempo => "tempo",
            ActionKind::Speed => "speed",
            ActionKind::Trim => "trim",
            ActionKind::Delay => "delay",
            ActionKind::Mute => "mute",
            ActionKind::Volume => "volume",
            ActionKind::Crop => "crop",
            ActionKind::Reencode => "reencode",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}

/// Argument attached to an action token.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionArg {
    /// Raw value, stored exactly as given (may be empty for `name=`).
    Text(String),
    /// `tempo` factor and reference rate.
    Tempo { factor: f64, reference: f64 },
}

/// One edit instruction: an action and its optional argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionToken {
    pub kind: ActionKind,
    pub arg: Option<ActionArg>,
}

impl ActionToken {
    pub fn new(kind: ActionKind, arg: Option<ActionArg>) -> Self {
        Self { kind, arg }
    }

    /// Build the typed edit for this token.
    ///
    /// `append` needs an explicit target here; the executor supplies the
    /// original input for a bare `append`.
    pub fn to_edit(&self, default_preset: QualityPreset) -> Result<Edit> {
        let edit = match self.kind {
            ActionKind::Append => {
                let into = PathBuf::from(self.required_text()?);
                if !into.is_file() {
                    return Err(self.invalid(format!("{:?} is not a file", into)));
                }
                Edit::Append { into }
            }
            ActionKind::Tempo => match self.arg {
                Some(ActionArg::Tempo { factor, reference }) => {
                    if factor <= 0.0 || reference <= 0.0 {
                        return Err(self.invalid("factor and reference rate must be positive"));
                    }
                    Edit::Tempo { factor, reference }
                }
                _ => return Err(self.invalid("expected tempo=FACTOR[,REFERENCE]")),
            },
            ActionKind::Speed => Edit::Speed {
                factor: self.positive_number()?,
            },
            ActionKind::Trim => {
                let range = self.required_text()?;
                let (start, end) = match range.split_once('-') {
                    Some((start, end)) => (start.trim(), Some(end.trim())),
                    None => (range.trim(), None),
                };
                if start.is_empty() || end.is_some_and(str::is_empty) {
                    return Err(self.invalid("expected trim=START[-END]"));
                }
                Edit::Trim {
                    start: start.to_string(),
                    end: end.map(str::to_string),
                }
            }
            ActionKind::Delay => {
                let value = self.required_text()?;
                let seconds = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| self.invalid(format!("'{value}' is not a number of seconds")))?;
                Edit::Delay { seconds }
            }
            ActionKind::Mute => {
                if self.arg.is_some() {
                    return Err(self.invalid("mute takes no argument"));
                }
                Edit::Mute
            }
            ActionKind::Volume => Edit::Volume {
                level: self.required_text()?.to_string(),
            },
            ActionKind::Crop => {
                let area = self.required_text()?;
                let parts = area.split(':').count();
                if parts != 2 && parts != 4 {
                    return Err(self.invalid("expected crop=W:H[:X:Y]"));
                }
                Edit::Crop {
                    area: area.to_string(),
                }
            }
            ActionKind::Reencode => {
                let preset = match &self.arg {
                    None => default_preset,
                    Some(ActionArg::Text(name)) => {
                        name.parse::<QualityPreset>().map_err(|e| self.invalid(e))?
                    }
                    Some(ActionArg::Tempo { .. }) => {
                        return Err(self.invalid("expected reencode[=PRESET]"))
                    }
                };
                Edit::Reencode { preset }
            }
        };
        edit.validate().map_err(|e| self.invalid(e))?;
        Ok(edit)
    }

    fn required_text(&self) -> Result<&str> {
        match &self.arg {
            Some(ActionArg::Text(value)) if !value.trim().is_empty() => Ok(value),
            _ => Err(self.invalid("an argument is required")),
        }
    }

    fn positive_number(&self) -> Result<f64> {
        let value = self.required_text()?;
        match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
            _ => Err(self.invalid(format!("'{value}' is not a positive number"))),
        }
    }

    fn invalid(&self, reason: impl fmt::Display) -> Error {
        Error::validation(format!("invalid '{}' action: {}", self.kind, reason))
    }
}

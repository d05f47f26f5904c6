//! Parsing raw `name[=value]` tokens into an [`ActionSequence`].

use super::action::{ActionArg, ActionKind, ActionToken, DEFAULT_REFERENCE_RATE};
use crate::{Error, Result};

/// Ordered, name-deduplicated list of action tokens.
///
/// Re-specifying a name overwrites the value of its first occurrence in
/// place; entries never move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionSequence {
    tokens: Vec<ActionToken>,
}

impl ActionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `token`, overwriting the argument of an existing entry of the
    /// same kind without changing its position.
    pub fn insert(&mut self, token: ActionToken) {
        match self.tokens.iter_mut().find(|t| t.kind == token.kind) {
            Some(existing) => existing.arg = token.arg,
            None => self.tokens.push(token),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[cfg(test)]
    fn get(&self, kind: ActionKind) -> Option<&ActionToken> {
        self.tokens.iter().find(|t| t.kind == kind)
    }
}

impl<'a> IntoIterator for &'a ActionSequence {
    type Item = &'a ActionToken;
    type IntoIter = std::slice::Iter<'a, ActionToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse raw command-line tokens into an action sequence.
///
/// Fails on the first unknown action name or malformed `tempo` value. Nothing
/// outside the returned value is touched.
pub fn parse_actions<I, S>(raw: I) -> Result<ActionSequence>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sequence = ActionSequence::new();
    for token in raw {
        sequence.insert(parse_token(token.as_ref())?);
    }
    Ok(sequence)
}

/// Parse a single `name`, `name=value` or `name=v1,v2` token.
pub fn parse_token(raw: &str) -> Result<ActionToken> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (raw, None),
    };

    let kind: ActionKind = name
        .parse()
        .map_err(|_| Error::UnknownAction(raw.to_string()))?;

    let arg = match (kind, value) {
        (_, None) => None,
        (ActionKind::Tempo, Some(value)) => Some(parse_tempo(raw, value)?),
        (_, Some(value)) => Some(ActionArg::Text(value.to_string())),
    };

    Ok(ActionToken::new(kind, arg))
}

fn parse_tempo(raw: &str, value: &str) -> Result<ActionArg> {
    let numbers = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::validation(format!("invalid tempo value in '{raw}': {e}")))?;

    match numbers.as_slice() {
        [factor] => Ok(ActionArg::Tempo {
            factor: *factor,
            reference: DEFAULT_REFERENCE_RATE,
        }),
        [factor, reference] => Ok(ActionArg::Tempo {
            factor: *factor,
            reference: *reference,
        }),
        _ => Err(Error::validation(format!(
            "invalid tempo value in '{raw}': expected FACTOR[,REFERENCE]"
        ))),
    }
}

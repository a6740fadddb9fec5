use serde::Serialize;

use crate::types::{ApertureError, ApertureResult};

const NESTED_MARKER: &str = ".fields(";

/// A recursive field selection: flat field names plus nested sub-selections
/// keyed by relation name.
///
/// A name lives in exactly one of `fields` or `nested` per node; the builder
/// methods enforce this, with a nested entry winning over a flat one of the
/// same name. `fields` keeps insertion order, which is also the output order
/// of the shaped response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSelection {
    pub fields: Vec<String>,
    pub nested: Vec<(String, FieldSelection)>,
}

impl FieldSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flat field. Duplicates and names already nested are dropped.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.push_field(name.into());
        self
    }

    /// Add several flat fields at once.
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.push_field(name.into());
        }
        self
    }

    /// Add a nested sub-selection, replacing any flat field or earlier
    /// nested entry with the same name.
    pub fn with_nested(mut self, name: impl Into<String>, child: FieldSelection) -> Self {
        self.push_nested(name.into(), child);
        self
    }

    /// Look up the sub-selection for a nested name.
    pub fn nested(&self, name: &str) -> Option<&FieldSelection> {
        self.nested
            .iter()
            .find(|(nested_name, _)| nested_name == name)
            .map(|(_, child)| child)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.nested.is_empty()
    }

    /// Parse a selection string like `name,author.fields(name,email)`.
    ///
    /// Terms are split on commas at parenthesis depth zero. A term of the
    /// form `name.fields(inner)`, with the closing parenthesis anchored at
    /// the term end, recurses on `inner`; any other term is a bare field
    /// name, uninterpreted. Empty terms contribute nothing, so an empty
    /// string parses to an empty selection. Unbalanced parentheses are
    /// rejected with [`ApertureError::MalformedSelection`].
    pub fn parse(raw: &str) -> ApertureResult<Self> {
        let mut selection = FieldSelection::new();
        for term in split_top_level(raw)? {
            match match_nested_term(term) {
                Some((name, inner)) => {
                    let child = Self::parse(inner)?;
                    selection.push_nested(name.to_string(), child);
                }
                None => selection.push_field(term.to_string()),
            }
        }
        Ok(selection)
    }

    /// Parse a request-supplied selection, prepending the always-included
    /// identifier fields at every level of the tree. A field the client also
    /// names explicitly is not duplicated.
    pub fn from_request(raw: &str, always_included: &[&str]) -> ApertureResult<Self> {
        let parsed = Self::parse(raw)?;
        Ok(parsed.prepend_always_included(always_included))
    }

    fn prepend_always_included(self, always_included: &[&str]) -> Self {
        let mut out = FieldSelection::new();
        for name in always_included {
            out.push_field((*name).to_string());
        }
        for name in self.fields {
            out.push_field(name);
        }
        for (name, child) in self.nested {
            out.push_nested(name, child.prepend_always_included(always_included));
        }
        out
    }

    fn push_field(&mut self, name: String) {
        if name.is_empty() {
            return;
        }
        if self.fields.iter().any(|field| *field == name) {
            return;
        }
        if self.nested.iter().any(|(nested_name, _)| *nested_name == name) {
            return;
        }
        self.fields.push(name);
    }

    fn push_nested(&mut self, name: String, child: FieldSelection) {
        if name.is_empty() {
            return;
        }
        self.fields.retain(|field| *field != name);
        match self
            .nested
            .iter_mut()
            .find(|(nested_name, _)| *nested_name == name)
        {
            Some(slot) => slot.1 = child,
            None => self.nested.push((name, child)),
        }
    }
}

/// Split on commas at parenthesis depth zero, validating balance.
fn split_top_level(raw: &str) -> ApertureResult<Vec<&str>> {
    let mut terms = Vec::new();
    let mut depth = 0i32;
    let mut term_start = 0usize;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ApertureError::malformed_selection(format!(
                        "unmatched ')' at byte {}",
                        idx
                    )));
                }
            }
            ',' if depth == 0 => {
                terms.push(&raw[term_start..idx]);
                term_start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ApertureError::malformed_selection(format!(
            "{} unclosed '('",
            depth
        )));
    }
    terms.push(&raw[term_start..]);
    Ok(terms)
}

/// Match `name.fields(inner)` with the trailing `)` anchored at the term
/// end. The name is the run of identifier characters immediately before the
/// first `.fields(`; a term without one is a bare field name.
fn match_nested_term(term: &str) -> Option<(&str, &str)> {
    if !term.ends_with(')') {
        return None;
    }
    let marker = term.find(NESTED_MARKER)?;
    let head = &term[..marker];
    let mut name_start = head.len();
    while name_start > 0 && is_ident_byte(head.as_bytes()[name_start - 1]) {
        name_start -= 1;
    }
    if name_start == head.len() {
        return None;
    }
    let inner = &term[marker + NESTED_MARKER.len()..term.len() - 1];
    Some((&head[name_start..], inner))
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

//! RFC 6901 JSON pointers
//!
//! Pointers appear in two places: as the fragment of a `$ref` target
//! (`other.yaml#/components/schemas/Pet`) and as the location of a reference
//! inside the bundled output (`#/paths/~1pets/get`).

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::Result;
use crate::error::document::invalid_pointer;

/// Characters escaped when a pointer is rendered as a URI fragment
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'%');

/// A parsed JSON pointer; the empty pointer addresses the whole document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The pointer to the document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an unescaped-on-the-wire pointer such as `/definitions/Pet`
    pub fn parse(pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }

        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(invalid_pointer(
                pointer,
                "pointer must be empty or start with '/'",
            ));
        };

        let tokens = rest.split('/').map(unescape_token).collect();
        Ok(Self { tokens })
    }

    /// Parse the fragment of a reference target
    ///
    /// A missing or empty fragment addresses the whole document.
    pub fn from_fragment(fragment: Option<&str>) -> Result<Self> {
        let Some(fragment) = fragment else {
            return Ok(Self::root());
        };

        let decoded = percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|e| invalid_pointer(fragment, format!("invalid fragment encoding: {e}")))?;

        Self::parse(&decoded)
    }

    /// Pointer to a child of the node this pointer addresses
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[cfg(test)]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render as a URI fragment, e.g. `#/paths/~1pets`
    pub fn to_fragment(&self) -> String {
        format!("#{}", utf8_percent_encode(&self.to_string(), FRAGMENT))
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Parse a sequence index token; leading zeros are not valid indices
pub fn parse_index(token: &str) -> Option<usize> {
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

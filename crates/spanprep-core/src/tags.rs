//! # BIO Tags for Entity Labeling
//!
//! The tag vocabulary of the labeled corpus, using the BIO
//! (Begin-Inside-Outside) scheme over an open set of entity types
//! (e.g. `PRODUCT`, `PRICE`, `LOCATION`).

use std::fmt;

/// A BIO tag attached to one corpus token.
///
/// The entity type is an open set: any `B-<TYPE>` or `I-<TYPE>` string is a
/// valid tag. Anything that carries neither prefix is treated as outside,
/// which matches how the corpus annotators use plain `O`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BioTag {
    /// First token of an entity of the given type.
    Begin(String),
    /// Continuation token of an entity of the given type.
    Inside(String),
    /// Token outside any entity.
    Outside,
}

impl BioTag {
    /// Parse a raw tag string from the corpus.
    ///
    /// Unrecognized tags fall back to [`BioTag::Outside`] rather than
    /// erroring, so a stray label in the corpus never aborts parsing.
    pub fn parse(raw: &str) -> Self {
        if let Some(ty) = raw.strip_prefix("B-") {
            BioTag::Begin(ty.to_string())
        } else if let Some(ty) = raw.strip_prefix("I-") {
            BioTag::Inside(ty.to_string())
        } else {
            BioTag::Outside
        }
    }

    /// The entity type this tag contributes to, if any.
    pub fn entity_type(&self) -> Option<&str> {
        match self {
            BioTag::Begin(ty) | BioTag::Inside(ty) => Some(ty),
            BioTag::Outside => None,
        }
    }

    /// Check if this is a "Begin" tag.
    pub fn is_begin(&self) -> bool {
        matches!(self, BioTag::Begin(_))
    }

    /// Check if this is an "Inside" tag.
    pub fn is_inside(&self) -> bool {
        matches!(self, BioTag::Inside(_))
    }
}

impl fmt::Display for BioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BioTag::Begin(ty) => write!(f, "B-{ty}"),
            BioTag::Inside(ty) => write!(f, "I-{ty}"),
            BioTag::Outside => write!(f, "O"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_begin_and_inside() {
        assert_eq!(BioTag::parse("B-PRODUCT"), BioTag::Begin("PRODUCT".into()));
        assert_eq!(BioTag::parse("I-PRICE"), BioTag::Inside("PRICE".into()));
        assert_eq!(BioTag::parse("O"), BioTag::Outside);
    }

    #[test]
    fn unknown_tags_are_outside() {
        assert_eq!(BioTag::parse("MISC"), BioTag::Outside);
        assert_eq!(BioTag::parse(""), BioTag::Outside);
        assert_eq!(BioTag::parse("b-product"), BioTag::Outside);
    }

    #[test]
    fn display_roundtrip() {
        for raw in ["B-LOCATION", "I-LOCATION", "O"] {
            assert_eq!(BioTag::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn entity_type_accessor() {
        assert_eq!(BioTag::parse("B-PRICE").entity_type(), Some("PRICE"));
        assert_eq!(BioTag::parse("I-PRICE").entity_type(), Some("PRICE"));
        assert_eq!(BioTag::Outside.entity_type(), None);
    }

    #[test]
    fn begin_inside_predicates() {
        assert!(BioTag::parse("B-PRODUCT").is_begin());
        assert!(!BioTag::parse("B-PRODUCT").is_inside());
        assert!(BioTag::parse("I-PRODUCT").is_inside());
        assert!(!BioTag::Outside.is_begin());
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumeration descriptors: ordered element names mapped to indices.

use crate::error::{Error, Result};

/// One enumeration element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationElement {
    /// Element name.
    pub name: String,
    /// Optional abbreviation accepted when parsing.
    pub short_name: Option<String>,
    /// Optional one-letter code (compact textual encodings).
    pub one_letter_code: Option<char>,
}

impl EnumerationElement {
    /// Create element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            one_letter_code: None,
        }
    }

    /// Set short name.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }
}

/// Element table of an enumeration type.
///
/// Index `num_elements()` is reserved as the missing value, so valid values
/// live in `0..num_elements()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationDescriptor {
    elements: Vec<EnumerationElement>,
}

impl EnumerationDescriptor {
    /// Build from an element list, rejecting duplicate names and short names.
    pub fn new(owner: &str, elements: Vec<EnumerationElement>) -> Result<Self> {
        for (i, element) in elements.iter().enumerate() {
            if element.name.is_empty() {
                return Err(Error::InvalidValue {
                    type_name: owner.to_string(),
                    value: format!("empty element name at index {}", i),
                });
            }
            let clash = elements[..i].iter().any(|other| {
                other.name == element.name
                    || (element.short_name.is_some() && other.short_name == element.short_name)
            });
            if clash {
                return Err(Error::DuplicateMember {
                    owner: owner.to_string(),
                    name: element.name.clone(),
                });
            }
        }
        Ok(Self { elements })
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Index encoding the missing value.
    pub fn missing_index(&self) -> usize {
        self.elements.len()
    }

    /// Elements in declaration order.
    pub fn elements(&self) -> &[EnumerationElement] {
        &self.elements
    }

    /// Element at `index`.
    pub fn element(&self, index: usize) -> Result<&EnumerationElement> {
        self.elements.get(index).ok_or(Error::IndexOutOfRange {
            index,
            length: self.elements.len(),
        })
    }

    /// Element name at `index`.
    pub fn element_name(&self, index: usize) -> Result<&str> {
        self.element(index).map(|e| e.name.as_str())
    }

    /// Resolve a name to its index.
    ///
    /// Precedence: exact name, exact short name, then the same two
    /// comparisons ignoring ASCII case. Returns `None` when nothing matches.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        let short_matches = |e: &EnumerationElement, exact: bool| {
            e.short_name.as_deref().is_some_and(|s| {
                if exact {
                    s == name
                } else {
                    s.eq_ignore_ascii_case(name)
                }
            })
        };
        self.elements
            .iter()
            .position(|e| e.name == name)
            .or_else(|| self.elements.iter().position(|e| short_matches(e, true)))
            .or_else(|| {
                self.elements
                    .iter()
                    .position(|e| e.name.eq_ignore_ascii_case(name))
            })
            .or_else(|| self.elements.iter().position(|e| short_matches(e, false)))
    }

    /// Resolve a one-letter code to its index.
    pub fn index_of_one_letter_code(&self, code: char) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.one_letter_code == Some(code))
    }

    /// One-letter code of the element at `index`.
    pub fn one_letter_code(&self, index: usize) -> Option<char> {
        self.elements.get(index).and_then(|e| e.one_letter_code)
    }

    /// Attach one-letter codes, one char per element in order.
    pub(crate) fn set_one_letter_codes(&mut self, owner: &str, codes: &str) -> Result<()> {
        let chars: Vec<char> = codes.chars().collect();
        if chars.len() != self.elements.len() {
            return Err(Error::InvalidValue {
                type_name: owner.to_string(),
                value: format!(
                    "{} one-letter codes for {} elements",
                    chars.len(),
                    self.elements.len()
                ),
            });
        }
        for (element, code) in self.elements.iter_mut().zip(chars) {
            element.one_letter_code = Some(code);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> EnumerationDescriptor {
        EnumerationDescriptor::new(
            "Color",
            vec![
                EnumerationElement::new("Red").with_short_name("r"),
                EnumerationElement::new("Green").with_short_name("g"),
                EnumerationElement::new("Blue"),
            ],
        )
        .expect("valid enumeration")
    }

    #[test]
    fn test_index_of_name_precedence() {
        let e = colors();
        assert_eq!(e.index_of_name("Green"), Some(1));
        assert_eq!(e.index_of_name("g"), Some(1));
        assert_eq!(e.index_of_name("blue"), Some(2));
        assert_eq!(e.index_of_name("R"), Some(0));
        assert_eq!(e.index_of_name("Purple"), None);
    }

    #[test]
    fn test_exact_short_name_beats_case_insensitive_name() {
        let e = EnumerationDescriptor::new(
            "Odd",
            vec![
                EnumerationElement::new("ab"),
                EnumerationElement::new("Other").with_short_name("AB"),
            ],
        )
        .expect("valid enumeration");
        assert_eq!(e.index_of_name("AB"), Some(1));
        assert_eq!(e.index_of_name("ab"), Some(0));
    }

    #[test]
    fn test_full_name_beats_identical_short_name() {
        let e = EnumerationDescriptor::new(
            "Marker",
            vec![
                EnumerationElement::new("Cross").with_short_name("X"),
                EnumerationElement::new("X"),
            ],
        )
        .expect("valid enumeration");
        assert_eq!(e.index_of_name("X"), Some(1));
        assert_eq!(e.index_of_name("Cross"), Some(0));
        assert_eq!(e.index_of_name("x"), Some(1));
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = EnumerationDescriptor::new(
            "Dup",
            vec![EnumerationElement::new("A"), EnumerationElement::new("A")],
        );
        assert!(matches!(result, Err(Error::DuplicateMember { .. })));
    }

    #[test]
    fn test_missing_index_and_bounds() {
        let e = colors();
        assert_eq!(e.missing_index(), 3);
        assert_eq!(e.element_name(2).expect("in range"), "Blue");
        assert!(matches!(
            e.element_name(3),
            Err(Error::IndexOutOfRange { index: 3, length: 3 })
        ));
    }

    #[test]
    fn test_one_letter_codes() {
        let mut e = colors();
        assert!(e.set_one_letter_codes("Color", "RG").is_err());
        e.set_one_letter_codes("Color", "RGB").expect("codes");
        assert_eq!(e.index_of_one_letter_code('B'), Some(2));
        assert_eq!(e.one_letter_code(0), Some('R'));
    }
}

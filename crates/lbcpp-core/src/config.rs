// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime configuration - single source of truth for format constants.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: XML vocabulary, format version, missing-value sentinels
//! - **Level 2 (Dynamic)**: [`CodecOptions`] chosen per [`XmlCodec`](crate::xml::XmlCodec)
//!
//! **NEVER hardcode tag or attribute names elsewhere!**

// =======================================================================
// XML Vocabulary
// =======================================================================

/// Root tag of a saved document.
pub const ROOT_TAG: &str = "lbcpp";

/// Format version written on the document root.
pub const FORMAT_VERSION: u32 = 1;

/// Tag used for every serialized value (root and members).
pub const VARIABLE_TAG: &str = "variable";

/// Attribute holding the (bracket-escaped) type name.
pub const TYPE_ATTRIBUTE: &str = "type";

/// Attribute holding the member name of a member element.
pub const NAME_ATTRIBUTE: &str = "name";

/// Attribute flagging an absent value (`missing="true"`).
pub const MISSING_ATTRIBUTE: &str = "missing";

/// Attribute identifying an object referenced more than once.
pub const ID_ATTRIBUTE: &str = "id";

/// Attribute referring back to an object written earlier.
pub const REF_ATTRIBUTE: &str = "ref";

/// Attribute holding the format version on the root.
pub const VERSION_ATTRIBUTE: &str = "version";

// =======================================================================
// Type Names
// =======================================================================

/// Generic-name delimiters as written in type names.
pub const TYPE_NAME_OPEN: char = '<';
/// Closing generic-name delimiter.
pub const TYPE_NAME_CLOSE: char = '>';

/// Replacement for `<` inside XML attributes.
pub const XML_TYPE_NAME_OPEN: char = '[';
/// Replacement for `>` inside XML attributes.
pub const XML_TYPE_NAME_CLOSE: char = ']';

// =======================================================================
// Missing-Value Sentinels
// =======================================================================

/// Sentinel payload of a missing integer.
///
/// Outside any range a real feature or counter reaches in practice.
pub const MISSING_INTEGER: i64 = 0x0FEE_FEEE_FEEE_FEEE;

/// Bit pattern of a missing double (same sentinel, reinterpreted).
///
/// Compared bitwise, so `NaN` stays an ordinary value.
pub const MISSING_DOUBLE_BITS: u64 = MISSING_INTEGER as u64;

/// Missing double as an `f64`.
#[inline]
#[must_use]
pub fn missing_double() -> f64 {
    f64::from_bits(MISSING_DOUBLE_BITS)
}

// =======================================================================
// Codec Options (Dynamic)
// =======================================================================

/// Options for XML save/load.
///
/// ```rust
/// use lbcpp_core::config::CodecOptions;
///
/// let compact = CodecOptions::default().with_indent(0);
/// assert_eq!(compact.indent, 0);
/// assert!(compact.share_objects);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Write objects reachable more than once a single time, then by `ref`.
    ///
    /// When disabled, shared objects are duplicated and cycles are rejected.
    pub share_objects: bool,
    /// Verify the `name` attribute of member elements against the class layout.
    pub check_member_names: bool,
    /// Pretty-print indentation width (0 = compact single line).
    pub indent: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            share_objects: true,
            check_member_names: true,
            indent: 2,
        }
    }
}

impl CodecOptions {
    /// Set indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable/disable shared-object references.
    #[must_use]
    pub fn with_shared_objects(mut self, enabled: bool) -> Self {
        self.share_objects = enabled;
        self
    }

    /// Enable/disable member-name verification on load.
    #[must_use]
    pub fn with_member_name_check(mut self, enabled: bool) -> Self {
        self.check_member_names = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_double_is_not_nan() {
        let missing = missing_double();
        assert!(!missing.is_nan());
        assert_eq!(missing.to_bits(), MISSING_DOUBLE_BITS);
    }

    #[test]
    fn test_default_options() {
        let opts = CodecOptions::default();
        assert!(opts.share_objects);
        assert!(opts.check_member_names);
        assert_eq!(opts.indent, 2);
    }
}

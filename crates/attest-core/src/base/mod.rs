//! Foundational primitive types and text conversion helpers.

mod field;

pub use field::{
    FieldElementError, field_element_to_hex, format_field_element, parse_field_element,
};

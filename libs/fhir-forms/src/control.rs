//! Element type to form control dispatch
//!
//! A closed match over the known FHIR type kinds with an explicit
//! unsupported fallback, rather than an open string-keyed lookup.

use meridian_models::ElementDefinitionType;
use serde::Serialize;

/// The input control an element renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ControlKind {
    /// Single-line text (string, uri, url, canonical, id, oid, uuid)
    Text,

    /// Multi-line markdown text
    Markdown,

    /// Checkbox
    Boolean,

    /// Whole-number input (integer, unsignedInt, positiveInt, integer64)
    Integer,

    /// Decimal-number input
    Decimal,

    /// Date picker
    Date,

    /// Date-time picker (dateTime, instant, time)
    DateTime,

    /// Coded value; carries the binding value set for expansion, if any
    Coded { value_set: Option<String> },

    /// Resource reference; carries allowed target profiles
    Reference { targets: Vec<String> },

    /// Quantity with unit (Quantity, Age, Duration, Distance, Count, Money)
    Quantity,

    /// File attachment
    Attachment,

    /// Nested complex type or backbone group, edited via child controls
    Complex { type_name: String },

    /// Type this form model does not know how to edit
    Unsupported { type_code: String },
}

impl ControlKind {
    /// Dispatch a single element type entry to a control.
    ///
    /// `value_set` is the element's binding, threaded through for coded
    /// controls so the renderer can drive a `$expand` call.
    pub fn from_type(entry: &ElementDefinitionType, value_set: Option<&str>) -> Self {
        match entry.code.as_str() {
            "string" | "uri" | "url" | "canonical" | "id" | "oid" | "uuid" | "base64Binary" => {
                ControlKind::Text
            }
            "markdown" | "xhtml" => ControlKind::Markdown,
            "boolean" => ControlKind::Boolean,
            "integer" | "unsignedInt" | "positiveInt" | "integer64" => ControlKind::Integer,
            "decimal" => ControlKind::Decimal,
            "date" => ControlKind::Date,
            "dateTime" | "instant" | "time" => ControlKind::DateTime,
            "code" | "Coding" | "CodeableConcept" => ControlKind::Coded {
                value_set: value_set.map(str::to_string),
            },
            "Reference" => ControlKind::Reference {
                targets: entry.target_profile.clone().unwrap_or_default(),
            },
            "Quantity" | "Age" | "Duration" | "Distance" | "Count" | "Money" => {
                ControlKind::Quantity
            }
            "Attachment" => ControlKind::Attachment,
            "BackboneElement" | "Element" => ControlKind::Complex {
                type_name: entry.code.clone(),
            },
            code => {
                // Complex datatypes are capitalized by FHIR convention and
                // decompose into child controls; anything else is a
                // primitive this model has no editor for.
                if code.chars().next().map(char::is_uppercase).unwrap_or(false) {
                    ControlKind::Complex {
                        type_name: code.to_string(),
                    }
                } else {
                    ControlKind::Unsupported {
                        type_code: code.to_string(),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str) -> ElementDefinitionType {
        ElementDefinitionType {
            code: code.to_string(),
            profile: None,
            target_profile: None,
        }
    }

    #[test]
    fn primitives_map_to_scalar_controls() {
        assert_eq!(ControlKind::from_type(&entry("string"), None), ControlKind::Text);
        assert_eq!(ControlKind::from_type(&entry("boolean"), None), ControlKind::Boolean);
        assert_eq!(ControlKind::from_type(&entry("positiveInt"), None), ControlKind::Integer);
        assert_eq!(ControlKind::from_type(&entry("decimal"), None), ControlKind::Decimal);
        assert_eq!(ControlKind::from_type(&entry("instant"), None), ControlKind::DateTime);
    }

    #[test]
    fn coded_controls_carry_the_binding() {
        let control = ControlKind::from_type(
            &entry("code"),
            Some("http://hl7.org/fhir/ValueSet/administrative-gender"),
        );
        assert_eq!(
            control,
            ControlKind::Coded {
                value_set: Some("http://hl7.org/fhir/ValueSet/administrative-gender".to_string())
            }
        );
    }

    #[test]
    fn references_carry_target_profiles() {
        let mut reference = entry("Reference");
        reference.target_profile =
            Some(vec!["http://hl7.org/fhir/StructureDefinition/Patient".to_string()]);

        assert_eq!(
            ControlKind::from_type(&reference, None),
            ControlKind::Reference {
                targets: vec!["http://hl7.org/fhir/StructureDefinition/Patient".to_string()]
            }
        );
    }

    #[test]
    fn unknown_types_fall_back_explicitly() {
        assert_eq!(
            ControlKind::from_type(&entry("HumanName"), None),
            ControlKind::Complex {
                type_name: "HumanName".to_string()
            }
        );
        assert_eq!(
            ControlKind::from_type(&entry("futurePrimitive"), None),
            ControlKind::Unsupported {
                type_code: "futurePrimitive".to_string()
            }
        );
    }
}

//! End-to-end documentation generation over fixture artifacts

use meridian_docgen::{generate_fhir_docs, DocPage};
use meridian_models::{SearchParameter, StructureDefinition};
use serde_json::json;
use std::env;
use std::fs;

fn patient_sd() -> StructureDefinition {
    serde_json::from_value(json!({
        "resourceType": "StructureDefinition",
        "id": "Patient",
        "url": "http://hl7.org/fhir/StructureDefinition/Patient",
        "name": "Patient",
        "status": "active",
        "publisher": "HL7 International",
        "description": "Demographics and administrative information about a person.",
        "kind": "resource",
        "abstract": false,
        "type": "Patient",
        "derivation": "specialization",
        "snapshot": {
            "element": [
                {
                    "path": "Patient",
                    "min": 0,
                    "max": "*",
                    "definition": "Demographics | administrative information"
                },
                {
                    "path": "Patient.name",
                    "min": 0,
                    "max": "*",
                    "type": [{"code": "HumanName"}],
                    "definition": "A name associated with the individual."
                },
                {
                    "path": "Patient.name.family",
                    "min": 0,
                    "max": "1",
                    "type": [{"code": "string"}],
                    "definition": "Family name {surname}"
                }
            ]
        }
    }))
    .unwrap()
}

fn search_params() -> Vec<SearchParameter> {
    vec![
        serde_json::from_value(json!({
            "resourceType": "SearchParameter",
            "name": "family",
            "base": ["Patient"],
            "type": "string",
            "description": "A portion of the family name",
            "expression": "Patient.name.family"
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "resourceType": "SearchParameter",
            "name": "_id",
            "base": ["Resource"],
            "type": "token",
            "expression": "Resource.id"
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "resourceType": "SearchParameter",
            "name": "code",
            "base": ["Observation"],
            "type": "token"
        }))
        .unwrap(),
    ]
}

#[test]
fn page_layout_matches_the_documented_format() {
    let page = DocPage::build(&patient_sd(), &search_params()).unwrap();

    assert_eq!(page.name, "Patient");
    assert!(page.mdx.starts_with("---\nid: Patient\ntitle: Patient\n"));
    assert!(page.mdx.contains("# Patient\n"));

    // Root definition is the intro, with the pipe escaped.
    assert!(page.mdx.contains("Demographics / administrative information"));

    // Meta table rows.
    assert!(page.mdx.contains("| Publisher | HL7 International |"));
    assert!(page.mdx.contains("| URL | http://hl7.org/fhir/StructureDefinition/Patient |"));
    assert!(page.mdx.contains("| Abstract | false |"));

    // Structure rows: path, cardinality, type (resource name for the root),
    // escaped description.
    assert!(page.mdx.contains("| Patient | 0..* | Patient | Demographics / administrative information |"));
    assert!(page.mdx.contains("| Patient.name | 0..* | HumanName | A name associated with the individual. |"));
    assert!(page.mdx.contains("| Patient.name.family | 0..1 | string | Family name \\{surname\\} |"));
}

#[test]
fn search_parameters_are_filtered_to_the_resource() {
    let page = DocPage::build(&patient_sd(), &search_params()).unwrap();

    assert!(page.mdx.contains("| family | string | A portion of the family name | Patient.name.family |"));
    // Resource-based parameters apply to every type.
    assert!(page.mdx.contains("| _id | token |  | Resource.id |"));
    // Observation-only parameters stay out.
    assert!(!page.mdx.contains("| code | token |"));
}

#[test]
fn generates_pages_and_the_canonical_map() {
    let base = env::temp_dir().join(format!("meridian-docgen-{}", std::process::id()));
    let artifact_dir = base.join("artifacts");
    let out_dir = base.join("docs");
    let _ = fs::remove_dir_all(&base);
    fs::create_dir_all(&artifact_dir).unwrap();

    fs::write(
        artifact_dir.join("patient.json"),
        serde_json::to_string_pretty(&patient_sd()).unwrap(),
    )
    .unwrap();
    fs::write(
        artifact_dir.join("family-param.json"),
        serde_json::to_string(&search_params()[0]).unwrap(),
    )
    .unwrap();
    // Profiles get no page but must not break the run.
    fs::write(
        artifact_dir.join("us-patient.json"),
        serde_json::to_string(&json!({
            "resourceType": "StructureDefinition",
            "url": "http://example.org/StructureDefinition/us-patient",
            "name": "UsPatient",
            "status": "active",
            "kind": "resource",
            "abstract": false,
            "type": "Patient",
            "derivation": "constraint"
        }))
        .unwrap(),
    )
    .unwrap();
    // Unrelated resources are skipped entirely.
    fs::write(
        artifact_dir.join("valueset.json"),
        serde_json::to_string(&json!({"resourceType": "ValueSet", "status": "active"})).unwrap(),
    )
    .unwrap();

    let pages = generate_fhir_docs(&artifact_dir, &out_dir).unwrap();
    assert_eq!(pages, 1);

    assert!(out_dir.join("API/FHIR/Patient.mdx").exists());
    assert!(out_dir.join("API/FHIR/Patient.json").exists());
    assert!(!out_dir.join("API/FHIR/UsPatient.mdx").exists());

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("type-to-canonical.json")).unwrap())
            .unwrap();
    assert_eq!(
        map["Patient"],
        json!("http://hl7.org/fhir/StructureDefinition/Patient")
    );

    fs::remove_dir_all(&base).unwrap();
}

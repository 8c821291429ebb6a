//! Conformance artifact loading
//!
//! Reads a directory of FHIR JSON artifacts and sorts them into the two
//! resource types documentation is generated from.

use anyhow::{Context, Result};
use meridian_models::{SearchParameter, StructureDefinition, StructureDefinitionKind};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The artifacts a documentation run works from.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    pub structure_definitions: Vec<StructureDefinition>,
    pub search_parameters: Vec<SearchParameter>,
}

impl ArtifactSet {
    /// Load every `*.json` file in a directory.
    ///
    /// Files whose `resourceType` is neither StructureDefinition nor
    /// SearchParameter are skipped. A file that names one of those types but
    /// does not parse as it is an error.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut set = ArtifactSet::default();

        let entries = fs::read_dir(dir)
            .with_context(|| format!("reading artifact directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading artifact {}", path.display()))?;
            let value: Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing artifact {}", path.display()))?;

            match value.get("resourceType").and_then(Value::as_str) {
                Some("StructureDefinition") => {
                    let sd: StructureDefinition = serde_json::from_value(value)
                        .with_context(|| format!("invalid StructureDefinition in {}", path.display()))?;
                    set.structure_definitions.push(sd);
                }
                Some("SearchParameter") => {
                    let param: SearchParameter = serde_json::from_value(value)
                        .with_context(|| format!("invalid SearchParameter in {}", path.display()))?;
                    set.search_parameters.push(param);
                }
                _ => {
                    tracing::debug!(path = %path.display(), "skipping non-conformance artifact");
                }
            }
        }

        tracing::info!(
            structure_definitions = set.structure_definitions.len(),
            search_parameters = set.search_parameters.len(),
            "loaded artifacts"
        );
        Ok(set)
    }

    /// The definitions that get a documentation page: base resource
    /// definitions, not profiles and not data types.
    pub fn documentable(&self) -> impl Iterator<Item = &StructureDefinition> {
        self.structure_definitions
            .iter()
            .filter(|sd| sd.kind == StructureDefinitionKind::Resource && !sd.is_constraint())
    }
}

/// Map each defined type to its canonical URL.
///
/// Profiles are excluded; they constrain an existing type rather than
/// defining one.
pub fn canonical_map(definitions: &[StructureDefinition]) -> BTreeMap<String, String> {
    definitions
        .iter()
        .filter(|sd| !sd.is_constraint())
        .map(|sd| (sd.type_name.clone(), sd.url.clone()))
        .collect()
}

//! Reference documentation generator
//!
//! Turns a directory of FHIR conformance artifacts (StructureDefinitions and
//! SearchParameters) into MDX pages for a documentation site, one page per
//! base resource type, plus a machine-readable type-to-canonical map.
//!
//! The pipeline is load -> page model -> emit: [`artifacts`] reads and sorts
//! the inputs, [`page`] renders one resource into MDX, and
//! [`generate_fhir_docs`] drives the whole run and writes the files.

pub mod artifacts;
pub mod page;

pub use artifacts::{canonical_map, ArtifactSet};
pub use page::{escape, DocPage};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Generate the full documentation tree.
///
/// Writes `API/FHIR/<Name>.mdx` and a companion `<Name>.json` (the raw
/// StructureDefinition) under `out_dir` for every base resource definition
/// found in `artifact_dir`, plus `type-to-canonical.json` at the root of
/// `out_dir`. Returns the number of pages written.
pub fn generate_fhir_docs(artifact_dir: &Path, out_dir: &Path) -> Result<usize> {
    let set = ArtifactSet::load_dir(artifact_dir)?;

    let fhir_dir = out_dir.join("API").join("FHIR");
    fs::create_dir_all(&fhir_dir)
        .with_context(|| format!("creating output directory {}", fhir_dir.display()))?;

    let mut pages = 0;
    for sd in set.documentable() {
        let doc = DocPage::build(sd, &set.search_parameters)
            .with_context(|| format!("rendering page for {}", sd.name))?;

        let mdx_path = fhir_dir.join(format!("{}.mdx", doc.name));
        fs::write(&mdx_path, &doc.mdx)
            .with_context(|| format!("writing {}", mdx_path.display()))?;

        let json_path = fhir_dir.join(format!("{}.json", doc.name));
        fs::write(&json_path, serde_json::to_string_pretty(sd)?)
            .with_context(|| format!("writing {}", json_path.display()))?;

        tracing::debug!(resource = %doc.name, "wrote documentation page");
        pages += 1;
    }

    let map = canonical_map(&set.structure_definitions);
    let map_path = out_dir.join("type-to-canonical.json");
    fs::write(&map_path, serde_json::to_string_pretty(&map)?)
        .with_context(|| format!("writing {}", map_path.display()))?;

    tracing::info!(pages, "documentation generated");
    Ok(pages)
}

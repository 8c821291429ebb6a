//! MDX page building
//!
//! One page per resource type: front matter, a summary taken from the root
//! element, a meta-properties table, the element structure, and the search
//! parameters that apply to the type.

use anyhow::Result;
use meridian_elements::ElementTree;
use meridian_models::{ElementDefinition, SearchParameter, StructureDefinition};

/// Make a value safe inside an MDX table cell.
///
/// Pipes would split the cell, newlines would end the row, and braces,
/// backticks and angle brackets are MDX/JSX syntax.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => out.push('/'),
            '\r' | '\n' => {}
            '{' | '}' | '`' | '<' | '>' => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out
}

/// A rendered documentation page for one resource type.
#[derive(Debug)]
pub struct DocPage {
    /// Resource name, used for the output file names
    pub name: String,

    /// Full MDX content
    pub mdx: String,
}

impl DocPage {
    /// Render the page for a StructureDefinition.
    ///
    /// `search_params` is the full parameter set; the page keeps the ones
    /// whose base includes this resource, Resource, or DomainResource.
    pub fn build(sd: &StructureDefinition, search_params: &[SearchParameter]) -> Result<Self> {
        let mut mdx = String::new();

        mdx.push_str(&format!(
            "---\nid: {}\ntitle: {}\ntags:\n  - fhir\n  - Fast Healthcare Interoperability Resources\n  - hl7\n  - healthcare it\n  - interoperability\n---\n\n",
            sd.id.as_deref().unwrap_or(&sd.name),
            sd.name
        ));

        mdx.push_str(&format!("# {}\n\n", sd.name));
        if let Some(definition) = sd.root_definition() {
            mdx.push_str(&escape(definition));
            mdx.push_str("\n\n");
        }

        mdx.push_str(&meta_properties(sd));
        mdx.push('\n');

        mdx.push_str("## Structure\n\n");
        mdx.push_str("| Path | Cardinality | Type | Description |\n");
        mdx.push_str("| ---- | ----------- | ---- | ----------- |\n");
        mdx.push_str(&structure_rows(sd)?);
        mdx.push('\n');

        mdx.push_str("## Search Parameters\n\n");
        mdx.push_str("| Name | Type | Description | Expression |\n");
        mdx.push_str("| ---- | ---- | ----------- | ---------- |\n");
        for param in search_params.iter().filter(|p| p.applies_to(&sd.name)) {
            mdx.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                param.name,
                param.param_type,
                escape(param.description.as_deref().unwrap_or("")),
                escape(param.expression.as_deref().unwrap_or("")),
            ));
        }
        mdx.push('\n');

        Ok(Self {
            name: sd.name.clone(),
            mdx,
        })
    }
}

fn meta_properties(sd: &StructureDefinition) -> String {
    let row = |property: &str, value: &str| format!("| {} | {} |\n", property, escape(value));

    let mut table = String::from("| Property | Value |\n| -------- | ----- |\n");
    table.push_str(&row("Publisher", sd.publisher.as_deref().unwrap_or("")));
    table.push_str(&row("Name", &sd.name));
    table.push_str(&row("URL", &sd.url));
    table.push_str(&row("Status", &sd.status));
    table.push_str(&row("Description", sd.description.as_deref().unwrap_or("")));
    table.push_str(&row("Abstract", if sd.is_abstract { "true" } else { "false" }));
    table
}

/// One table row per element, in definition order (each element before its
/// children, siblings in snapshot order).
fn structure_rows(sd: &StructureDefinition) -> Result<String> {
    if sd.elements().is_empty() {
        return Ok(String::new());
    }

    let tree = ElementTree::from_structure_definition(sd)?;
    let rows = tree.fold_bottom_up(|node, children: Vec<String>| {
        let mut out = structure_row(node.element, &sd.name);
        for child in children {
            out.push_str(&child);
        }
        out
    });
    Ok(rows)
}

fn structure_row(element: &ElementDefinition, resource_name: &str) -> String {
    format!(
        "| {} | {} | {} | {} |\n",
        element.path,
        element.cardinality_string(),
        element.primary_type_code().unwrap_or(resource_name),
        escape(element.definition.as_deref().unwrap_or("")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_table_and_jsx_syntax() {
        assert_eq!(escape("a | b"), "a / b");
        assert_eq!(escape("line\r\nbreak"), "linebreak");
        assert_eq!(escape("{x}"), "\\{x\\}");
        assert_eq!(escape("`code`"), "\\`code\\`");
        assert_eq!(escape("<tag>"), "\\<tag\\>");
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn structure_row_falls_back_to_the_resource_name() {
        let element = ElementDefinition::with_path("Patient");
        assert_eq!(structure_row(&element, "Patient"), "| Patient | 0..* | Patient |  |\n");
    }
}

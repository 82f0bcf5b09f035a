use crate::error::{PulseError, Result};
use crate::model::Template;
use std::collections::BTreeMap;
use std::path::Path;

/// Load externally authored team templates from a directory of JSON files,
/// one template per file. A missing directory just means no templates.
/// Ids are routing keys, so duplicates across files are rejected.
pub fn load_templates<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<String, Template>> {
    let dir = dir.as_ref();
    let mut templates = BTreeMap::new();
    if !dir.exists() {
        return Ok(templates);
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let raw = std::fs::read_to_string(&path)?;
        let template: Template = serde_json::from_str(&raw).map_err(|e| {
            PulseError::Template(format!("{}: {e}", path.display()))
        })?;
        if template.id.is_empty() {
            return Err(PulseError::Template(format!(
                "{}: template id must not be empty",
                path.display()
            )));
        }
        if let Some(previous) = templates.insert(template.id.clone(), template) {
            return Err(PulseError::Template(format!(
                "duplicate template id {:?}",
                previous.id
            )));
        }
    }
    Ok(templates)
}

pub fn find<'a>(
    templates: &'a BTreeMap<String, Template>,
    id: &str,
) -> Result<&'a Template> {
    templates
        .get(id)
        .ok_or_else(|| PulseError::NotFound(format!("no template with id {id:?}")))
}

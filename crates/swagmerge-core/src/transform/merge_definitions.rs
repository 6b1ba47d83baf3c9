use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::error::MergeError;
use crate::parse::document::SwaggerDoc;

/// A flat `type name -> schema fragment` mapping loaded from an extension file.
pub type ExtensionDoc = IndexMap<String, serde_json::Value>;

/// Definition names touched by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Names that were not in `definitions` before the merge.
    pub added: Vec<String>,
    /// Names that replaced an existing entry, whether generated or from an
    /// earlier extension file.
    pub overridden: Vec<String>,
}

/// Read and parse one extension file.
pub fn load_extension(path: &Path) -> Result<ExtensionDoc, MergeError> {
    let content = fs::read_to_string(path).map_err(|source| MergeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| MergeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Insert every entry of `ext` into the document's definitions, replacing
/// entries with the same name.
pub fn merge_extension(doc: &mut SwaggerDoc, ext: ExtensionDoc, summary: &mut MergeSummary) {
    for (name, fragment) in ext {
        if doc.definitions.insert(name.clone(), fragment).is_some() {
            if !summary.overridden.contains(&name) {
                summary.overridden.push(name);
            }
        } else {
            summary.added.push(name);
        }
    }
}

/// Merge extension files into the document in order. Later files win.
///
/// Every file is loaded before the document is touched, so an unreadable or
/// malformed file leaves `doc` as it was.
pub fn merge_definitions(
    doc: &mut SwaggerDoc,
    sources: &[PathBuf],
) -> Result<MergeSummary, MergeError> {
    let extensions = sources
        .iter()
        .map(|path| load_extension(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = MergeSummary::default();
    for (path, ext) in sources.iter().zip(extensions) {
        debug!("merging {} definitions from {}", ext.len(), path.display());
        merge_extension(doc, ext, &mut summary);
    }
    Ok(summary)
}

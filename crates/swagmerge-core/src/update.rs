use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::build::SpecBuilder;
use crate::config::SwagmergeConfig;
use crate::emit;
use crate::error::UpdateError;
use crate::parse::document::SwaggerDoc;
use crate::parse::template::DocTemplate;
use crate::transform::{
    MergeSummary, RefRewrite, RewriteConvention, merge_definitions, rewrite_refs,
};

/// Inputs for one update of a generated `docs.go`.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub docs_file: PathBuf,
    pub extension_files: Vec<PathBuf>,
    pub convention: RewriteConvention,
    /// Run every stage but leave the file alone.
    pub dry_run: bool,
}

impl UpdateOptions {
    pub fn from_config(config: &SwagmergeConfig) -> Self {
        Self {
            docs_file: config.docs_file(),
            extension_files: config.extension_paths(),
            convention: RewriteConvention {
                marker: config.marker.clone(),
            },
            dry_run: false,
        }
    }
}

/// The artifact text after merging and rewriting, plus what changed.
#[derive(Debug, Clone)]
pub struct PatchedDocs {
    pub text: String,
    pub doc: SwaggerDoc,
    pub merge: MergeSummary,
    pub rewrites: Vec<RefRewrite>,
}

/// Outcome of [`update_docs`].
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub docs_file: PathBuf,
    pub merge: MergeSummary,
    pub rewrites: Vec<RefRewrite>,
    /// The patched text differs from what was on disk.
    pub changed: bool,
    pub written: bool,
}

/// Extract, merge, rewrite and reassemble `source` without touching disk.
pub fn patch_docs(
    source: &str,
    extension_files: &[PathBuf],
    convention: &RewriteConvention,
) -> Result<PatchedDocs, UpdateError> {
    let template = DocTemplate::extract(source)?;
    let mut doc = template.parse_document()?;

    let merge = merge_definitions(&mut doc, extension_files)?;
    let rewrites = rewrite_refs(&mut doc, convention)?;

    let json = emit::to_json(&doc)?;
    let text = template.reassemble(&json);

    Ok(PatchedDocs {
        text,
        doc,
        merge,
        rewrites,
    })
}

/// Read the artifact and patch it, without writing.
pub fn plan_update(options: &UpdateOptions) -> Result<(String, PatchedDocs), UpdateError> {
    let source = fs::read_to_string(&options.docs_file).map_err(|source| {
        UpdateError::ReadArtifact {
            path: options.docs_file.clone(),
            source,
        }
    })?;
    let patched = patch_docs(&source, &options.extension_files, &options.convention)?;
    Ok((source, patched))
}

/// Patch the artifact in place. Nothing is written unless every stage
/// succeeds.
pub fn update_docs(options: &UpdateOptions) -> Result<UpdateReport, UpdateError> {
    debug!("updating {}", options.docs_file.display());
    let (source, patched) = plan_update(options)?;
    let changed = source != patched.text;

    let written = if options.dry_run {
        false
    } else {
        write_artifact(&options.docs_file, &patched.text).map_err(|source| {
            UpdateError::WriteArtifact {
                path: options.docs_file.clone(),
                source,
            }
        })?;
        info!("wrote {}", options.docs_file.display());
        true
    };

    Ok(UpdateReport {
        docs_file: options.docs_file.clone(),
        merge: patched.merge,
        rewrites: patched.rewrites,
        changed,
        written,
    })
}

/// Run the spec builder, then [`update_docs`].
pub fn build_and_update(
    builder: &dyn SpecBuilder,
    options: &UpdateOptions,
) -> Result<UpdateReport, UpdateError> {
    builder.build()?;
    update_docs(options)
}

/// Replace `path` with `content` via a temporary file in the same directory,
/// keeping the original permissions.
pub fn write_artifact(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

use log::debug;

use crate::error::RewriteError;
use crate::parse::document::SwaggerDoc;

use super::type_hint::{DEFAULT_MARKER, TypeHint, marker_tag};

/// Prefix of a local reference into the definitions table.
pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

/// How response descriptions flag third-party payload types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConvention {
    pub marker: String,
}

impl Default for RewriteConvention {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

/// A single response schema to be replaced by a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefRewrite {
    pub path: String,
    pub status: String,
    pub target: String,
}

impl RefRewrite {
    pub fn ref_path(&self) -> String {
        format!("{}{}", DEFINITIONS_REF_PREFIX, self.target)
    }
}

/// Find every `post` response whose description names a definition and check
/// that each named definition exists.
///
/// Other verbs are never inspected. An empty marker, any malformed
/// description or an unknown type fails the whole plan.
pub fn plan_rewrites(
    doc: &SwaggerDoc,
    convention: &RewriteConvention,
) -> Result<Vec<RefRewrite>, RewriteError> {
    marker_tag(&convention.marker)?;
    let mut plan = Vec::new();

    for (path, item) in &doc.paths {
        let Some(ref post) = item.post else {
            continue;
        };

        for (status, response) in &post.responses {
            let hint = TypeHint::parse(&response.description, &convention.marker).map_err(
                |source| RewriteError::MalformedDescription {
                    path: path.clone(),
                    status: status.clone(),
                    source,
                },
            )?;

            let TypeHint::Target(target) = hint else {
                continue;
            };
            if !doc.has_definition(&target) {
                return Err(RewriteError::UnknownType {
                    name: target,
                    path: path.clone(),
                });
            }

            plan.push(RefRewrite {
                path: path.clone(),
                status: status.clone(),
                target,
            });
        }
    }

    Ok(plan)
}

/// Point each planned response schema at its definition, dropping any inline
/// `type`.
pub fn apply_rewrites(doc: &mut SwaggerDoc, plan: &[RefRewrite]) {
    for rewrite in plan {
        let Some(response) = doc
            .paths
            .get_mut(&rewrite.path)
            .and_then(|item| item.post.as_mut())
            .and_then(|post| post.responses.get_mut(&rewrite.status))
        else {
            continue;
        };

        let schema = response.schema.get_or_insert_with(serde_json::Map::new);
        schema.insert(
            "$ref".to_string(),
            serde_json::Value::String(rewrite.ref_path()),
        );
        schema.remove("type");
        debug!(
            "POST {} {} -> {}",
            rewrite.path,
            rewrite.status,
            rewrite.ref_path()
        );
    }
}

/// Plan and apply in one step. The document is only modified if the whole
/// plan is valid.
pub fn rewrite_refs(
    doc: &mut SwaggerDoc,
    convention: &RewriteConvention,
) -> Result<Vec<RefRewrite>, RewriteError> {
    let plan = plan_rewrites(doc, convention)?;
    apply_rewrites(doc, &plan);
    Ok(plan)
}

use crate::error::ConventionError;

/// Marker tag that flags a response description as naming a third-party type.
pub const DEFAULT_MARKER: &str = "third-lib-";

/// What a response description says about the response's real payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// No marker tag; the response is left alone.
    NotApplicable,
    /// The description names this definition as the response schema.
    Target(String),
}

impl TypeHint {
    /// Parse a response description using the given marker tag.
    ///
    /// The description is trimmed and split into hyphen-separated segments,
    /// with everything up to the first `-` after the tag counted as the first
    /// segment. `"third-lib-1-Widget"` therefore reads as
    /// `["third-lib", "1", "Widget"]` and targets `Widget`, whether the marker
    /// is written `third-lib-` or `third-lib`.
    pub fn parse(description: &str, marker: &str) -> Result<Self, ConventionError> {
        let tag = marker_tag(marker)?;
        let description = description.trim();
        let Some(pos) = description.find(marker) else {
            return Ok(TypeHint::NotApplicable);
        };

        let after = &description[pos + tag.len()..];
        let rest = after.split_once('-').map(|(_, rest)| rest);
        match rest.and_then(|rest| rest.split('-').nth(1)) {
            Some(name) => Ok(TypeHint::Target(name.to_string())),
            None => Err(ConventionError::TooFewSegments {
                description: description.to_string(),
                segments: 1 + rest.map_or(0, |rest| rest.split('-').count()),
            }),
        }
    }
}

/// The marker without its trailing hyphens. An empty tag is rejected.
pub fn marker_tag(marker: &str) -> Result<&str, ConventionError> {
    let tag = marker.trim_end_matches('-');
    if tag.is_empty() {
        return Err(ConventionError::EmptyMarker {
            marker: marker.to_string(),
        });
    }
    Ok(tag)
}

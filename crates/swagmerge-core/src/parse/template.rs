use crate::error::ExtractError;

use super::document::SwaggerDoc;

/// Opening marker of the raw string literal holding the docs template.
pub const OPEN_MARKER: &str = "`{";
/// Closing marker of the raw string literal holding the docs template.
pub const CLOSE_MARKER: &str = "}`";

/// Go template expression swag emits as the value of `"schemes"`. Not valid JSON.
pub const SCHEMES_EXPRESSION: &str = "{{ marshal .Schemes }}";
/// JSON string standing in for [`SCHEMES_EXPRESSION`] while the region is parsed.
pub const SCHEMES_PLACEHOLDER: &str = "\"__swagmerge_schemes_placeholder__\"";

/// The JSON document region of a generated `docs.go`, located by its
/// backtick markers.
///
/// Holds the byte range of the region so the patched document can be spliced
/// back without touching anything around it.
#[derive(Debug, Clone)]
pub struct DocTemplate<'a> {
    source: &'a str,
    start: usize,
    end: usize,
    masked: String,
    has_expression: bool,
}

impl<'a> DocTemplate<'a> {
    /// Locate the document region in `source` and mask the schemes expression.
    ///
    /// The region runs from the `{` of the first `` `{ `` to the `}` of the
    /// first `` }` `` after it, both inclusive. At most one schemes expression
    /// may appear in the region.
    pub fn extract(source: &'a str) -> Result<Self, ExtractError> {
        let start = source
            .find(OPEN_MARKER)
            .ok_or(ExtractError::MissingOpenMarker)?
            + 1;
        let end = source[start..]
            .find(CLOSE_MARKER)
            .map(|idx| start + idx + 1)
            .ok_or(ExtractError::MissingCloseMarker)?;

        let region = &source[start..end];
        if region.contains(SCHEMES_PLACEHOLDER) {
            return Err(ExtractError::PlaceholderCollision(SCHEMES_PLACEHOLDER));
        }
        let occurrences = region.matches(SCHEMES_EXPRESSION).count();
        if occurrences > 1 {
            return Err(ExtractError::AmbiguousTemplateExpression(occurrences));
        }

        Ok(Self {
            source,
            start,
            end,
            masked: region.replacen(SCHEMES_EXPRESSION, SCHEMES_PLACEHOLDER, 1),
            has_expression: occurrences == 1,
        })
    }

    /// The original, unmasked region text.
    pub fn region(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// The region with the schemes expression replaced by its placeholder.
    pub fn masked(&self) -> &str {
        &self.masked
    }

    pub fn has_expression(&self) -> bool {
        self.has_expression
    }

    /// Parse the masked region into a document.
    pub fn parse_document(&self) -> Result<SwaggerDoc, ExtractError> {
        Ok(super::from_json(&self.masked)?)
    }

    /// Unmask `json` and splice it in place of the original region.
    ///
    /// Text before and after the region is copied unchanged.
    pub fn reassemble(&self, json: &str) -> String {
        let restored = if self.has_expression {
            json.replacen(SCHEMES_PLACEHOLDER, SCHEMES_EXPRESSION, 1)
        } else {
            json.to_string()
        };

        let mut out =
            String::with_capacity(self.source.len() - self.region().len() + restored.len());
        out.push_str(&self.source[..self.start]);
        out.push_str(&restored);
        out.push_str(&self.source[self.end..]);
        out
    }
}

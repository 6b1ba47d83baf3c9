pub mod document;
pub mod operation;
pub mod template;

use crate::error::ParseError;
use document::SwaggerDoc;

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerDoc, ParseError> {
    let doc: SwaggerDoc = serde_json::from_str(input)?;
    Ok(doc)
}

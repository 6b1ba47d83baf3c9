use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::ParseError;
use crate::parse::document::SwaggerDoc;

/// Serialize a document as tab-indented JSON, matching the layout swag uses
/// for the template in `docs.go`.
pub fn to_json(doc: &SwaggerDoc) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    doc.serialize(&mut ser).map_err(ParseError::Serialize)?;
    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use swagmerge_core::error::{ConventionError, RewriteError, UpdateError};
use swagmerge_core::parse::document::SwaggerDoc;
use swagmerge_core::parse::template::DocTemplate;
use swagmerge_core::transform::RewriteConvention;
use swagmerge_core::{UpdateOptions, update_docs};

const DOCS: &str = include_str!("fixtures/docs.go");
const EXTANDS: &str = include_str!("fixtures/extands.json");
const EXTANDS_GRPC: &str = include_str!("fixtures/extands_grpc.json");

/// Split an artifact into the text before, inside and after its JSON region.
fn split(text: &str) -> (&str, &str, &str) {
    let start = text.find("`{").unwrap() + 1;
    let end = start + text[start..].find("}`").unwrap() + 1;
    (&text[..start], &text[start..end], &text[end..])
}

fn read_doc(text: &str) -> SwaggerDoc {
    DocTemplate::extract(text)
        .unwrap()
        .parse_document()
        .unwrap()
}

struct Workspace {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

impl Workspace {
    fn new(docs: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("docs/common")).unwrap();
        fs::write(root.join("docs/docs.go"), docs).unwrap();
        fs::write(root.join("docs/common/extands.json"), EXTANDS).unwrap();
        fs::write(root.join("docs/common/extands_grpc.json"), EXTANDS_GRPC).unwrap();
        Self { _dir: dir, root }
    }

    fn docs_file(&self) -> PathBuf {
        self.root.join("docs/docs.go")
    }

    fn extension(&self, name: &str) -> PathBuf {
        self.root.join("docs/common").join(name)
    }

    fn options(&self, extensions: &[&str]) -> UpdateOptions {
        UpdateOptions {
            docs_file: self.docs_file(),
            extension_files: extensions.iter().map(|e| self.extension(e)).collect(),
            convention: RewriteConvention::default(),
            dry_run: false,
        }
    }

    fn read(&self) -> String {
        fs::read_to_string(self.docs_file()).unwrap()
    }
}

fn untagged_docs() -> String {
    DOCS.replace("  third-lib-grpc-OrderReply  ", "OK")
}

#[test]
fn update_without_extensions_only_reindents_region() {
    let docs = untagged_docs();
    let ws = Workspace::new(&docs);

    let report = update_docs(&ws.options(&[])).unwrap();
    assert!(report.rewrites.is_empty());
    assert!(report.merge.added.is_empty());

    let out = ws.read();
    let (before_prefix, before_region, before_suffix) = split(&docs);
    let (after_prefix, after_region, after_suffix) = split(&out);
    assert_eq!(after_prefix, before_prefix);
    assert_eq!(after_suffix, before_suffix);

    // Same document, tab-indented.
    assert!(after_region.contains("\n\t\"schemes\": {{ marshal .Schemes }},\n"));
    assert_eq!(read_doc(&out), read_doc(&docs));
    assert_ne!(after_region, before_region);
}

#[test]
fn update_is_stable_on_second_run() {
    let ws = Workspace::new(DOCS);
    let opts = ws.options(&["extands.json", "extands_grpc.json"]);

    let first = update_docs(&opts).unwrap();
    assert!(first.changed);
    let once = ws.read();

    let second = update_docs(&opts).unwrap();
    assert!(!second.changed);
    assert_eq!(ws.read(), once);
}

#[test]
fn update_merges_extensions_in_order() {
    let ws = Workspace::new(DOCS);
    let report = update_docs(&ws.options(&["extands.json", "extands_grpc.json"])).unwrap();

    let doc = read_doc(&ws.read());
    let defs = &doc.definitions;
    assert_eq!(defs.len(), 4);
    assert_eq!(defs["OrderReply"]["x-source"], "grpc");
    assert_eq!(defs["Status"]["enum"], json!(["PENDING", "DONE"]));
    assert!(defs["model.Order"]["properties"].get("items").is_some());
    assert!(defs.contains_key("httputil.HTTPError"));

    assert_eq!(report.merge.added, ["OrderReply", "Status"]);
    assert_eq!(report.merge.overridden, ["model.Order", "OrderReply"]);
}

#[test]
fn update_rewrites_tagged_post_response() {
    let ws = Workspace::new(DOCS);
    let report = update_docs(&ws.options(&["extands.json"])).unwrap();

    assert_eq!(report.rewrites.len(), 1);
    assert_eq!(report.rewrites[0].path, "/orders");
    assert_eq!(report.rewrites[0].status, "200");
    assert_eq!(report.rewrites[0].target, "OrderReply");

    let doc = read_doc(&ws.read());
    let post = doc.paths["/orders"].post.as_ref().unwrap();
    let schema = post.responses["200"].schema.clone().unwrap();
    assert_eq!(
        serde_json::Value::Object(schema),
        json!({"$ref": "#/definitions/OrderReply"})
    );
    // Description is left as written.
    assert_eq!(
        post.responses["200"].description,
        "  third-lib-grpc-OrderReply  "
    );

    // The GET with the same description is not rewritten.
    let get = &doc.paths["/orders/{id}"].extra["get"];
    assert_eq!(get["responses"]["200"]["schema"], json!({"type": "object"}));
}

#[test]
fn unknown_type_aborts_without_writing() {
    let ws = Workspace::new(DOCS);
    let err = update_docs(&ws.options(&[])).unwrap_err();
    match &err {
        UpdateError::Rewrite(RewriteError::UnknownType { name, path }) => {
            assert_eq!(name, "OrderReply");
            assert_eq!(path, "/orders");
        }
        other => panic!("expected UnknownType, got {other:?}"),
    }
    assert!(err.to_string().contains("OrderReply"));
    assert_eq!(ws.read(), DOCS);
}

#[test]
fn malformed_tag_aborts_without_writing() {
    let docs = DOCS.replace("  third-lib-grpc-OrderReply  ", "third-lib-Oops");
    let ws = Workspace::new(&docs);

    let err = update_docs(&ws.options(&["extands.json"])).unwrap_err();
    assert!(matches!(
        err,
        UpdateError::Rewrite(RewriteError::MalformedDescription { ref path, .. }) if path == "/orders"
    ));
    assert!(err.to_string().contains("/orders"));
    assert_eq!(ws.read(), docs);
}

#[test]
fn empty_marker_aborts_without_writing() {
    let docs = untagged_docs();
    let ws = Workspace::new(&docs);
    let mut opts = ws.options(&["extands.json"]);
    opts.convention.marker = String::new();

    let err = update_docs(&opts).unwrap_err();
    assert!(matches!(
        err,
        UpdateError::Rewrite(RewriteError::Convention(ConventionError::EmptyMarker { .. }))
    ));
    assert_eq!(ws.read(), docs);
}

#[test]
fn marker_without_trailing_hyphen_rewrites_same_response() {
    let ws = Workspace::new(DOCS);
    let mut opts = ws.options(&["extands.json"]);
    opts.convention.marker = "third-lib".to_string();

    let report = update_docs(&opts).unwrap();
    assert_eq!(report.rewrites.len(), 1);
    assert_eq!(report.rewrites[0].target, "OrderReply");
}

#[test]
fn bad_extension_aborts_without_writing() {
    let ws = Workspace::new(DOCS);
    fs::write(ws.extension("broken.json"), "{\"A\": ").unwrap();

    let err = update_docs(&ws.options(&["extands.json", "broken.json"])).unwrap_err();
    assert!(matches!(err, UpdateError::Merge(_)));
    assert!(err.to_string().contains("broken.json"));
    assert_eq!(ws.read(), DOCS);
}

#[test]
fn missing_markers_abort_without_writing() {
    let text = "package docs\n\nconst docTemplate = \"{}\"\n";
    let ws = Workspace::new(text);

    let err = update_docs(&ws.options(&[])).unwrap_err();
    assert!(matches!(err, UpdateError::Extract(_)));
    assert_eq!(ws.read(), text);
}

#[test]
fn surrounding_text_is_preserved() {
    let prefix = "// odd { prefix } with `quotes` and braces\npackage x\nvar a = `{";
    let suffix = "}`\n/* trailing } ` text { */\nvar b = `{not json}`\n";
    let body = r#"
  "schemes": {{ marshal .Schemes }},
  "paths": {"/w": {"post": {"responses": {"200": {"description": "third-lib-1-Widget", "schema": {"type": "object"}}}}}},
  "definitions": {"Widget": {"type": "object"}}
"#;
    let text = format!("{prefix}{body}{suffix}");
    let ws = Workspace::new(&text);

    update_docs(&ws.options(&[])).unwrap();

    let out = ws.read();
    assert!(out.starts_with(prefix));
    assert!(out.ends_with(suffix));
    let region = &out[prefix.len()..out.len() - suffix.len()];
    assert!(region.contains("\"$ref\": \"#/definitions/Widget\""));
    assert!(region.contains("{{ marshal .Schemes }}"));
}

#[test]
fn dry_run_leaves_file_alone() {
    let ws = Workspace::new(DOCS);
    let mut opts = ws.options(&["extands.json"]);
    opts.dry_run = true;

    let report = update_docs(&opts).unwrap();
    assert!(report.changed);
    assert!(!report.written);
    assert_eq!(report.rewrites.len(), 1);
    assert_eq!(ws.read(), DOCS);
}

#[cfg(unix)]
#[test]
fn update_keeps_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new(DOCS);
    fs::set_permissions(ws.docs_file(), fs::Permissions::from_mode(0o644)).unwrap();

    update_docs(&ws.options(&["extands.json"])).unwrap();

    let mode = fs::metadata(ws.docs_file()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

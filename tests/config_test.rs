use maquette::config::{load_manifest, parse_manifest, MANIFEST_FILES};
use maquette::error::Error;
use tempfile::TempDir;

const YAML: &str = r#"
flags:
  api:
    wagtail: { question: "Would you like a Wagtail CMS?", default: false }
    celery: { default: false }
  front:
    enable: { question: "Will you have a front-end?", default: true }
implies:
  - { when: api.wagtail, then: front.enable }
variables:
  project_name:
    question: "What is your project's name?"
  cms_prefix:
    question: "URL prefix for the CMS admin?"
    default: "wubba-lubba-dub-dub"
  secret_key:
    secret: true
prune:
  - when_false: api.wagtail
    patterns: ["**/apps/cms", "**/apps/cms/**"]
format:
  py: "black -q"
"#;

#[test]
fn test_parse_yaml_manifest() {
    let manifest = parse_manifest(YAML).unwrap();

    assert_eq!(manifest.flags["api"]["wagtail"].default, false);
    assert_eq!(manifest.flags["front"]["enable"].default, true);
    assert_eq!(manifest.implies.len(), 1);
    assert_eq!(
        manifest.variables["cms_prefix"].default.as_deref(),
        Some("wubba-lubba-dub-dub")
    );
    assert!(manifest.variables["secret_key"].secret);
    assert_eq!(manifest.prune[0].when_false, "api.wagtail");
    assert_eq!(manifest.format["py"], "black -q");
}

#[test]
fn test_parse_json_manifest() {
    let json = r#"{
        "flags": { "api": { "wagtail": { "default": true } } },
        "variables": { "project_name": {} }
    }"#;

    let manifest = parse_manifest(json).unwrap();
    assert!(manifest.flags["api"]["wagtail"].default);
    assert!(manifest.variables.contains_key("project_name"));
}

#[test]
fn test_parse_empty_manifest() {
    let manifest = parse_manifest("{}").unwrap();
    assert!(manifest.flags.is_empty());
    assert!(manifest.variables.is_empty());
}

#[test]
fn test_parse_invalid_manifest() {
    let result = parse_manifest("flags: [not, a, mapping]");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_implications_parse_to_canonical_paths() {
    let manifest = parse_manifest(YAML).unwrap();
    let implications = manifest.implications().unwrap();

    assert_eq!(implications[0].when.to_string(), "api.wagtail");
    assert_eq!(implications[0].then.to_string(), "front.enable");
}

#[test]
fn test_implication_with_bad_path_is_rejected() {
    let manifest =
        parse_manifest("implies:\n  - { when: wagtail, then: front.enable }\n").unwrap();

    assert!(matches!(manifest.implications(), Err(Error::Config(_))));
}

#[test]
fn test_load_manifest_from_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("maquette.yml"), YAML).unwrap();

    let (manifest, path) = load_manifest(dir.path()).unwrap();
    assert!(manifest.flags.contains_key("api"));
    assert_eq!(path, dir.path().join("maquette.yml"));
}

#[test]
fn test_load_manifest_prefers_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("maquette.json"), r#"{"format": {"py": "json"}}"#).unwrap();
    std::fs::write(dir.path().join("maquette.yml"), "format:\n  py: yaml\n").unwrap();

    let (manifest, path) = load_manifest(dir.path()).unwrap();
    assert_eq!(manifest.format["py"], "json");
    assert_eq!(path, dir.path().join(MANIFEST_FILES[0]));
}

#[test]
fn test_load_manifest_missing() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(load_manifest(dir.path()), Err(Error::Config(_))));
}

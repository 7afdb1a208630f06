use maquette::config::parse_manifest;
use maquette::error::Error;
use maquette::prompt::collect_answers;
use serde_json::json;

const MANIFEST: &str = r#"
flags:
  api:
    wagtail: { default: false }
  front:
    enable: { default: true }
variables:
  project_name:
    question: "What is your project's name?"
  cms_prefix:
    default: "wubba-lubba-dub-dub"
  secret_key:
    secret: true
"#;

#[test]
fn test_preloaded_answers_bypass_prompting() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let preloaded = json!({
        "api.wagtail": true,
        "project_name": "Acme Corp"
    });

    let answers = collect_answers(&manifest, Some(preloaded)).unwrap();

    assert_eq!(answers.choices.get("api.wagtail"), Some(&true));
    // Unanswered flags stay implicit so implication rules may still set them.
    assert!(!answers.choices.contains_key("front.enable"));
    assert_eq!(answers.variables.get("project_name"), Some("Acme Corp"));
}

#[test]
fn test_unanswered_variables_fall_back_to_defaults() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let answers = collect_answers(&manifest, Some(json!({}))).unwrap();

    assert_eq!(answers.variables.get("cms_prefix"), Some("wubba-lubba-dub-dub"));
    // No default declared and nothing preloaded: empty value.
    assert_eq!(answers.variables.get("project_name"), Some(""));
}

#[test]
fn test_secret_variables_are_generated_not_prompted() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let answers = collect_answers(&manifest, Some(json!({}))).unwrap();

    let secret = answers.variables.get("secret_key").unwrap();
    assert_eq!(secret.len(), maquette::vars::SECRET_LENGTH);
    assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));

    // Generated once per run: two runs disagree.
    let again = collect_answers(&manifest, Some(json!({}))).unwrap();
    assert_ne!(secret, again.variables.get("secret_key").unwrap());
}

#[test]
fn test_non_boolean_flag_answer_is_rejected() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let preloaded = json!({ "api.wagtail": "yes" });

    let result = collect_answers(&manifest, Some(preloaded));
    assert!(matches!(result, Err(Error::Config(_))));
}

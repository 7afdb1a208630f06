use indexmap::IndexMap;
use maquette::directive::{parse_directive, process, Directive};
use maquette::error::Error;
use maquette::flags::{FlagConfig, FlagPath};
use maquette::syntax::{DASHES, HASH, MARKUP, SLASH};
use std::path::Path;

fn config(pairs: &[(&str, bool)]) -> FlagConfig {
    let values: IndexMap<String, bool> =
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    FlagConfig::from_values(values)
}

fn file() -> &'static Path {
    Path::new("template/settings.py")
}

#[test]
fn test_parse_directive_hash_syntax() {
    assert_eq!(
        parse_directive("# :: IF api__wagtail", &HASH),
        Some(Directive::Open(FlagPath::new("api", "wagtail")))
    );
    assert_eq!(parse_directive("# :: ENDIF", &HASH), Some(Directive::Close));
    assert_eq!(
        parse_directive("    # :: IF api.wagtail", &HASH),
        Some(Directive::Open(FlagPath::new("api", "wagtail")))
    );
}

#[test]
fn test_parse_directive_other_syntaxes() {
    assert_eq!(
        parse_directive("// :: IF front.enable", &SLASH),
        Some(Directive::Open(FlagPath::new("front", "enable")))
    );
    assert_eq!(
        parse_directive("<!-- :: IF front.enable -->", &MARKUP),
        Some(Directive::Open(FlagPath::new("front", "enable")))
    );
    assert_eq!(parse_directive("<!-- :: ENDIF -->", &MARKUP), Some(Directive::Close));
    assert_eq!(
        parse_directive("-- :: IF api.enable", &DASHES),
        Some(Directive::Open(FlagPath::new("api", "enable")))
    );
}

#[test]
fn test_parse_directive_rejects_non_directives() {
    // Ordinary comments and content are not directives.
    assert_eq!(parse_directive("# just a comment", &HASH), None);
    assert_eq!(parse_directive("print('x')", &HASH), None);
    // Directive marker embedded mid-line is content.
    assert_eq!(parse_directive("print('x')  # :: IF api.wagtail", &HASH), None);
    // Boolean combinators are not supported.
    assert_eq!(parse_directive("# :: IF api.wagtail AND front.enable", &HASH), None);
    // Markup directives must carry the closing marker.
    assert_eq!(parse_directive("<!-- :: IF front.enable", &MARKUP), None);
}

#[test]
fn test_disabled_block_is_removed_entirely() {
    let text = "# :: IF api__wagtail\nimport wagtail\n# :: ENDIF\nprint(\"ok\")";
    let config = config(&[("api.wagtail", false)]);

    let out = process(text, Some(HASH), &config, file()).unwrap();
    assert_eq!(out, "print(\"ok\")");
}

#[test]
fn test_enabled_block_keeps_content_but_drops_directives() {
    let text = "# :: IF api__wagtail\nimport wagtail\n# :: ENDIF\nprint(\"ok\")\n";
    let config = config(&[("api.wagtail", true)]);

    let out = process(text, Some(HASH), &config, file()).unwrap();
    assert_eq!(out, "import wagtail\nprint(\"ok\")\n");
}

#[test]
fn test_nested_blocks_and_effective_state() {
    let text = "apps = [\n\
                # :: IF api.enable\n\
                \"base\",\n\
                # :: IF api.wagtail\n\
                \"cms\",\n\
                # :: ENDIF\n\
                # :: ENDIF\n\
                ]\n";

    let config = config(&[("api.enable", true), ("api.wagtail", false)]);
    let out = process(text, Some(HASH), &config, file()).unwrap();
    assert_eq!(out, "apps = [\n\"base\",\n]\n");

    let config = config_all_on();
    let out = process(text, Some(HASH), &config, file()).unwrap();
    assert_eq!(out, "apps = [\n\"base\",\n\"cms\",\n]\n");
}

fn config_all_on() -> FlagConfig {
    config(&[("api.enable", true), ("api.wagtail", true)])
}

#[test]
fn test_inner_block_inside_disabled_outer_is_dropped() {
    // The inner flag is true but the outer block is disabled; the inner
    // content is dropped purely because of the ancestor.
    let text = "# :: IF api.wagtail\n\
                # :: IF front.enable\n\
                inner\n\
                # :: ENDIF\n\
                # :: ENDIF\n\
                tail\n";
    let config = config(&[("api.wagtail", false), ("front.enable", true)]);

    let out = process(text, Some(HASH), &config, file()).unwrap();
    assert_eq!(out, "tail\n");
}

#[test]
fn test_unknown_flag_is_a_hard_error() {
    let text = "# :: IF api.channels\nx\n# :: ENDIF\n";
    let config = config(&[("api.wagtail", false)]);

    match process(text, Some(HASH), &config, file()) {
        Err(Error::UnknownFlag { line, path, .. }) => {
            assert_eq!(line, 1);
            assert_eq!(path, "api.channels");
        }
        other => panic!("expected UnknownFlag, got {:?}", other),
    }
}

#[test]
fn test_unmatched_endif() {
    let text = "a\n# :: ENDIF\nb\n";
    let config = config(&[]);

    match process(text, Some(HASH), &config, file()) {
        Err(Error::UnmatchedEndif { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected UnmatchedEndif, got {:?}", other),
    }
}

#[test]
fn test_unmatched_if() {
    let text = "a\n# :: IF api.wagtail\nb\n";
    let config = config(&[("api.wagtail", true)]);

    match process(text, Some(HASH), &config, file()) {
        Err(Error::UnmatchedIf { line, path, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(path, "api.wagtail");
        }
        other => panic!("expected UnmatchedIf, got {:?}", other),
    }
}

#[test]
fn test_unknown_syntax_passes_through_unchanged() {
    let text = ":: IF api.wagtail\nnot a directive, no comment syntax\n:: ENDIF\n";
    let config = config(&[]);

    let out = process(text, None, &config, file()).unwrap();
    assert_eq!(out, text);
}

#[test]
fn test_markup_syntax_blocks() {
    let text = "<html>\n\
                <!-- :: IF front.enable -->\n\
                <div id=\"app\"></div>\n\
                <!-- :: ENDIF -->\n\
                </html>\n";
    let config = config(&[("front.enable", false)]);

    let out = process(text, Some(MARKUP), &config, Path::new("index.html")).unwrap();
    assert_eq!(out, "<html>\n</html>\n");
}

#[test]
fn test_crlf_directive_lines() {
    let text = "# :: IF api.wagtail\r\nimport wagtail\r\n# :: ENDIF\r\nprint(1)\r\n";
    let config = config(&[("api.wagtail", false)]);

    let out = process(text, Some(HASH), &config, file()).unwrap();
    assert_eq!(out, "print(1)\r\n");
}

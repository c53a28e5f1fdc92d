//! Integration tests over the httpd sample configuration
//!
//! These tests parse `tests/fixtures/httpd.conf` and check the resulting tree,
//! path lookups and attribute values.

use blockconf::{parse_file, parse_str, AttrValue, ConfigTree, Declaration, ParseError};
use rstest::{fixture, rstest};

const SAMPLE_PATH: &str = "tests/fixtures/httpd.conf";

#[fixture]
fn sample() -> ConfigTree {
    parse_file(SAMPLE_PATH).expect("sample config to parse")
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[rstest]
fn test_sample_depth_is_max_nesting(sample: ConfigTree) {
    assert_eq!(sample.depth(), 2);
}

#[rstest]
fn test_file_and_string_parsing_agree(sample: ConfigTree) {
    let source = std::fs::read_to_string(SAMPLE_PATH).unwrap();
    let from_string = parse_str(&source).unwrap();
    assert_eq!(from_string.node_count(), sample.node_count());
    assert_eq!(from_string.render_json(), sample.render_json());
}

#[rstest]
fn test_root_declaration_order(sample: ConfigTree) {
    let root = sample.root();
    let names: Vec<&str> = root
        .declarations()
        .iter()
        .map(|entry| sample.declaration_name(entry))
        .collect();
    assert_eq!(
        names,
        vec![
            "ServerRoot",
            "LockFile",
            "Directory",
            "Directory",
            "AccessFileName",
            "FilesMatch",
            "IfModule",
            "IfModule",
            "Include",
        ]
    );
    assert_eq!(root.children().count(), 5);
}

#[rstest]
#[case("/", "ServerRoot", AttrValue::Scalar("/usr/local/apache".to_string()))]
#[case("/", "AccessFileName", AttrValue::Scalar(".htaccess".to_string()))]
#[case("/Directory", "Deny", AttrValue::List(words(&["from", "all"])))]
#[case("/Directory", "Order", AttrValue::Scalar("deny,allow".to_string()))]
#[case("FilesMatch", "Satisfy", AttrValue::Scalar("All".to_string()))]
#[case(
    "IfModule/IfModule",
    "LogFormat",
    AttrValue::List(words(&[
        "\"%h", "%l", "%u", "%t", "\\\"%r\\\"", "%>s", "%b",
        "\\\"%{Referer}i\\\"", "\\\"%{User-Agent}i\\\"", "%I", "%O\"", "combinedio",
    ]))
)]
fn test_attribute_lookup(
    sample: ConfigTree,
    #[case] path: &str,
    #[case] key: &str,
    #[case] expected: AttrValue,
) {
    let node = sample.find(path).expect("path to resolve");
    assert_eq!(node.attribute(key), Some(&expected));
}

#[rstest]
fn test_find_returns_first_directory(sample: ConfigTree) {
    let dir = sample.find("/Directory").unwrap();
    assert_eq!(dir.values(), &["/"]);
    assert_eq!(
        dir.attribute("Deny"),
        Some(&AttrValue::List(words(&["from", "all"])))
    );
}

#[rstest]
fn test_find_all_returns_directories_in_order(sample: ConfigTree) {
    let dirs = sample.find_all("/Directory");
    let values: Vec<Vec<String>> = dirs.iter().map(|d| d.values().to_vec()).collect();
    assert_eq!(values, vec![words(&["/"]), words(&["\"/share/Qweb\""])]);
    assert_eq!(
        dirs[1].attribute("Options"),
        Some(&AttrValue::List(words(&["FollowSymLinks", "MultiViews"])))
    );
}

#[rstest]
#[case("/")]
#[case("")]
#[case("//")]
fn test_empty_path_returns_root(sample: ConfigTree, #[case] path: &str) {
    assert_eq!(sample.find(path), Some(sample.root()));
    assert_eq!(sample.find_all(path), vec![sample.root()]);
}

#[rstest]
fn test_second_match_is_reached_through_find_all(sample: ConfigTree) {
    let first = sample.find("/IfModule/").unwrap();
    assert_eq!(first.values(), &["log_config_module"]);
    assert_eq!(first.attribute("AddIconByEncoding"), None);

    let modules = sample.find_all("/IfModule/");
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[1].values(), &["autoindex_module"]);
    assert_eq!(
        modules[1].attribute("AddIconByEncoding"),
        Some(&AttrValue::List(words(&["(CMP,/icons/compressed.gif)", "x-compress", "x-gzip"])))
    );
    assert_eq!(
        modules[1].attribute("DefaultIcon"),
        Some(&AttrValue::Scalar("/icons/unknown.gif".to_string()))
    );
}

#[rstest]
fn test_nested_lookup_and_relative_queries(sample: ConfigTree) {
    let outer = sample.find("IfModule").unwrap();
    assert_eq!(outer.values(), &["log_config_module"]);

    let inner = outer.find("IfModule").unwrap();
    assert_eq!(inner.values(), &["logio_module"]);
    assert_eq!(inner.parent(), Some(outer));
    assert_eq!(sample.find("IfModule/IfModule"), Some(inner));
    assert_eq!(sample.find_all("IfModule").len(), 2);
    assert!(sample.find("IfModule/Directory").is_none());
}

#[rstest]
fn test_repeated_key_widens_but_keeps_every_declaration(sample: ConfigTree) {
    let module = sample.find("IfModule").unwrap();
    let log_format = module.attribute("LogFormat").unwrap();

    assert!(log_format.is_widened());
    assert_eq!(log_format.declaration_count(), 4);
    assert_eq!(module.declarations().len(), 5);
    assert!(matches!(module.declarations()[4], Declaration::Child(_)));

    let last_format = module.declared_value(3).and_then(|v| v.as_list());
    assert_eq!(last_format, Some(&words(&["\"%{User-agent}i\"", "agent"])[..]));
}

#[test]
fn test_logformat_twice_widens_to_two_entries() {
    let tree = parse_str(
        "LogFormat \"%h %l\" combined\nLogFormat \"%h\" common\n",
    )
    .unwrap();
    let root = tree.root();

    assert_eq!(root.declarations().len(), 2);
    assert_eq!(
        root.attribute("LogFormat"),
        Some(&AttrValue::Many(vec![
            AttrValue::List(words(&["\"%h", "%l\"", "combined"])),
            AttrValue::List(words(&["\"%h\"", "common"])),
        ]))
    );
}

#[test]
fn test_misnamed_close_aborts_parse() {
    let source = "<IfModule a>\n<Directory />\n</IfModule>\n</Directory>\n";
    match parse_str(source) {
        Err(ParseError::StructuralMismatch {
            expected,
            found,
            line,
        }) => {
            assert_eq!(expected.as_deref(), Some("Directory"));
            assert_eq!(found, "IfModule");
            assert_eq!(line, 3);
        }
        other => panic!("expected a structural mismatch, got {other:?}"),
    }
}

#[test]
fn test_unbalanced_tag_line_is_read_as_key_value() {
    let tree = parse_str("<Directory /var/www\n").unwrap();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(
        tree.root().attribute("<Directory"),
        Some(&AttrValue::Scalar("/var/www".to_string()))
    );
}

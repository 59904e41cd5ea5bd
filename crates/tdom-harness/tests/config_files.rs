#![forbid(unsafe_code)]

//! Loading harness configuration from disk and applying it to sessions.

use std::io::Write;

use tdom_harness::{HarnessConfig, HarnessError, MarkupConfig, Session, VirtualDom};

#[test]
fn toml_file_configures_session() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
memoize = true
max_depth = 64

[markup]
pretty = true
indent = 4
"#
    )
    .unwrap();

    let config = HarnessConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.max_depth, 64);
    assert_eq!(
        config.markup,
        MarkupConfig {
            pretty: true,
            indent: 4
        }
    );

    let mut session = Session::with_config(config).unwrap();
    let tree = VirtualDom::element_node::<()>(
        "ul",
        vec![],
        vec![VirtualDom::element_node("li", vec![], vec![VirtualDom::text_node("one")])],
    );
    assert_eq!(
        session.render(tree).to_markup(),
        "<ul>\n    <li>\n        one\n    </li>\n</ul>"
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = HarnessConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, HarnessError::Io(_)));
}

#[test]
fn invalid_values_are_rejected_by_session() {
    let config = HarnessConfig::from_json_str(r#"{"max_depth": 0, "markup": {"indent": 99}}"#).unwrap();
    match Session::<()>::with_config(config) {
        Err(HarnessError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn written_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harness.toml");
    let config = HarnessConfig {
        memoize: false,
        ..HarnessConfig::default()
    };
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
    assert_eq!(HarnessConfig::from_toml_file(&path).unwrap(), config);
}

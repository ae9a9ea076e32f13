//! 从 TOML 文件加载切分器配置。

use std::path::PathBuf;

use label_lines::{SplitterConfig, TrailingEmpty, Utf8Policy, codes};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_fixture_and_applies_it() {
    let config = SplitterConfig::from_path(fixture("splitter.toml")).expect("fixture loads");
    assert_eq!(config.max_slots, Some(8));
    assert_eq!(config.trailing_empty, TrailingEmpty::Placeholder);
    assert_eq!(config.encoding, Utf8Policy::Lossy);

    let lines = config
        .splitter()
        .split(b"caf\xe9\n")
        .expect("lossy split succeeds");
    assert_eq!(lines.clone().into_strings(), vec!["caf\u{fffd}", " "]);

    let mut table = config.table();
    assert_eq!(table.slots(), 8);
    let overflow = ["r"; 8].join("\n");
    let err = table.fill(overflow.as_bytes()).expect_err("eight lines need nine slots");
    assert_eq!(err.code(), codes::TOO_MANY_LINES);
}

#[test]
fn type_mismatch_is_a_parse_error() {
    let err = SplitterConfig::from_toml_str("max_slots = \"many\"").expect_err("type mismatch");
    assert_eq!(err.code(), codes::CONFIG_PARSE);
}

#![forbid(unsafe_code)]

//! Golden checksum files over multi-pass renders.

use tdom_harness::fixtures::{Catalog, Phrase};
use tdom_harness::golden::{
    check_golden_with, golden_checksum_path, load_golden_checksums, save_golden_checksums,
};
use tdom_harness::{GoldenOutcome, Rendered, Session, VirtualDom, compute_markup_checksum};
use tdom_html::attributes::alt;
use tdom_html::{Tree, div, h1, img, p, text};

type Html = Tree<Phrase, (), VirtualDom>;

fn banner() -> Html {
    div(
        vec![],
        vec![
            h1(vec![], vec![text(Phrase::Greeting)]),
            img(vec![alt(Phrase::Logo)], vec![]),
            p(vec![], vec![text(Phrase::Tooltip)]),
        ],
    )
}

fn passes() -> Vec<Rendered<()>> {
    let mut session = Session::new();
    [Catalog::english(), Catalog::german()]
        .iter()
        .map(|catalog| session.render(banner().resolve(&catalog.resolver())))
        .collect()
}

#[test]
fn checksum_covers_compact_markup() {
    let all = passes();
    let rendered = &all[0];
    assert_eq!(
        rendered.to_markup(),
        r#"<div><h1>Hello</h1><img alt="Company logo"><p>Tooltip</p></div>"#
    );
    assert_eq!(rendered.checksum(), compute_markup_checksum(&rendered.to_markup()));
}

#[test]
fn bless_then_verify_passes() {
    let dir = tempfile::tempdir().unwrap();
    let blessed = check_golden_with(dir.path(), "banner", &passes(), true).unwrap();
    assert_eq!(blessed.outcome, GoldenOutcome::Blessed);
    assert_eq!(blessed.checksums.len(), 2);

    let verified = check_golden_with(dir.path(), "banner", &passes(), false).unwrap();
    assert_eq!(verified.outcome, GoldenOutcome::Pass);
    assert!(verified.is_pass());
    assert_eq!(verified.expected, blessed.checksums);
}

#[test]
fn drift_is_reported_with_its_pass_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = golden_checksum_path(dir.path(), "banner");
    let mut sums: Vec<String> = passes().iter().map(Rendered::checksum).collect();
    sums[1] = compute_markup_checksum("<div>stale</div>");
    save_golden_checksums(&path, &sums).unwrap();

    let result = check_golden_with(dir.path(), "banner", &passes(), false).unwrap();
    assert_eq!(result.outcome, GoldenOutcome::Fail);
    assert_eq!(result.mismatch_index, Some(1));
    assert!(result.format().contains("mismatch at pass 1"));
}

#[test]
fn golden_file_is_commented_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    check_golden_with(dir.path(), "banner", &passes(), true).unwrap();
    let path = golden_checksum_path(dir.path(), "banner");
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with('#'));
    let sums = load_golden_checksums(&path).unwrap();
    assert!(sums.iter().all(|s| s.starts_with("blake3:")));
}

#![cfg(feature = "cfpq-rsm")]

mod support;

use cfpq::rsm::{Ecfg, Rsm, minimize_rsm};
use cfpq::{Cfg, CfgLoadExt, Regex};

#[test]
fn test_text_and_cfg_agree() {
    support::init_logging();
    let text = "S -> a S b S | $";
    let from_text = Rsm::from_ecfg(&Ecfg::from_text(text, "S").unwrap());
    let from_cfg = Rsm::from_ecfg(&Ecfg::from_cfg(&Cfg::load(text, "S").unwrap()));
    assert_eq!(minimize_rsm(from_text), minimize_rsm(from_cfg));
}

#[test]
fn test_minimized_boxes_keep_languages() {
    let ecfg = Ecfg::from_text("S -> (a | a a)* B\nB -> b* | c", "S").unwrap();
    let rsm = Rsm::from_ecfg(&ecfg);
    let minimized = minimize_rsm(rsm.clone());
    assert_eq!(minimized.start(), "S");
    for (variable, minimal) in minimized.boxes() {
        let original = rsm.box_for(variable).unwrap();
        assert!(original.is_equivalent_to(minimal), "{}", variable);
        assert!(minimal.is_deterministic());
    }
    let expected = Regex::parse("a* B").unwrap().to_dfa();
    assert_eq!(minimized.box_for("S"), Some(&expected));
}

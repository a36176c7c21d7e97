use cfpq_cyk::{CfgCykExt, Cyk, cyk_accepts};
use cfpq_grammar::{Cfg, CfgLoadExt};
use test_case::test_case;

const DYCK: &str = "S -> a S b S | x S y S | $";
const CHAIN: &str = "S -> a S | P\nP -> b P | Q\nQ -> c Q | c";

#[test_case(DYCK, "" ; "dyck empty")]
#[test_case(DYCK, "ab" ; "dyck ab")]
#[test_case(DYCK, "xy" ; "dyck xy")]
#[test_case(DYCK, "abxyaxybxaby" ; "dyck long")]
#[test_case(DYCK, "xaxaaxybaxybbyby" ; "dyck nested")]
#[test_case(CHAIN, "c" ; "chain c")]
#[test_case(CHAIN, "abc" ; "chain abc")]
#[test_case(CHAIN, "acc" ; "chain acc")]
#[test_case(CHAIN, "aaaaabccccc" ; "chain long")]
#[test_case(CHAIN, "abccc" ; "chain abccc")]
fn test_accepts(grammar: &str, text: &str) {
    let cfg = Cfg::load(grammar, "S").unwrap();
    assert!(cyk_accepts(&cfg, text));
    assert!(cfg.cyk_accepts(text));
}

#[test_case(DYCK, "a" ; "dyck a")]
#[test_case(DYCK, "ba" ; "dyck ba")]
#[test_case(DYCK, "y" ; "dyck y")]
#[test_case(DYCK, "yx" ; "dyck yx")]
#[test_case(DYCK, "axby" ; "dyck crossed")]
#[test_case(CHAIN, "" ; "chain empty")]
#[test_case(CHAIN, "ca" ; "chain ca")]
#[test_case(CHAIN, "acb" ; "chain acb")]
#[test_case(CHAIN, "ab" ; "chain ab")]
#[test_case(CHAIN, "aaaaaabbbbb" ; "chain no c")]
fn test_rejects(grammar: &str, text: &str) {
    let cfg = Cfg::load(grammar, "S").unwrap();
    assert!(!cyk_accepts(&cfg, text));
}

#[test]
fn test_reuse() {
    let cfg = Cfg::load(DYCK, "S").unwrap();
    let cyk = Cyk::new(&cfg);
    let words = ["", "ab", "aabb", "abab", "ba", "aab"];
    let first: Vec<bool> = words.iter().map(|word| cyk.accepts(word)).collect();
    let second: Vec<bool> = words.iter().map(|word| cyk.accepts(word)).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![true, true, true, true, false, false]);
}

#[test]
fn test_unknown_characters() {
    let cfg = Cfg::load("S -> a b", "S").unwrap();
    assert!(!cyk_accepts(&cfg, "ac"));
    assert!(!cyk_accepts(&cfg, "?"));
}

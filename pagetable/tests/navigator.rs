use pagetable::PageNavigator;
use proptest::prelude::*;

#[test]
fn test_new_shows_one_based_page() {
    let nav = PageNavigator::new(2);
    assert_eq!(nav.input(), "3");
}

#[test]
fn test_commit_clamps_above_range() {
    let mut nav = PageNavigator::new(0);
    nav.set_input("9");
    assert_eq!(nav.commit(0, 3), Some(2));
    assert_eq!(nav.input(), "3");
}

#[test]
fn test_commit_rounds_decimals() {
    let mut nav = PageNavigator::new(0);
    nav.set_input("2.6");
    assert_eq!(nav.commit(0, 5), Some(2));
    assert_eq!(nav.input(), "3");
}

#[test]
fn test_commit_accepts_whitespace_and_exponent() {
    let mut nav = PageNavigator::new(0);
    nav.set_input("  2  ");
    assert_eq!(nav.commit(0, 5), Some(1));

    nav.set_input("1e1");
    assert_eq!(nav.commit(1, 20), Some(9));
}

#[test]
fn test_commit_infinity_goes_to_last_page() {
    let mut nav = PageNavigator::new(0);
    nav.set_input("inf");
    assert_eq!(nav.commit(0, 4), Some(3));
}

#[test]
fn test_commit_invalid_reverts() {
    for text in ["", "   ", "0", "-1", "abc", "NaN"] {
        let mut nav = PageNavigator::new(1);
        nav.set_input(text);
        assert_eq!(nav.commit(1, 5), None, "input {:?}", text);
        assert_eq!(nav.input(), "2", "input {:?}", text);
    }
}

#[test]
fn test_sync_only_on_change() {
    let mut nav = PageNavigator::new(0);
    nav.set_input("4");
    // Same authoritative index: the edit survives.
    assert!(!nav.sync(0));
    assert_eq!(nav.input(), "4");

    assert!(nav.sync(2));
    assert_eq!(nav.input(), "3");
}

#[test]
fn test_edit_helpers() {
    let mut nav = PageNavigator::new(0);
    nav.backspace();
    assert_eq!(nav.input(), "");
    assert!(nav.push_char('1'));
    assert!(!nav.push_char('x'));
    assert!(nav.push_char('2'));
    assert_eq!(nav.input(), "12");
}

proptest! {
    #[test]
    fn prop_commit_stays_in_range(
        text in "\\PC{0,8}",
        page_count in 0usize..200,
        current in 0usize..200,
    ) {
        let mut nav = PageNavigator::new(current);
        nav.set_input(text);
        let last = page_count.max(1);
        match nav.commit(current, page_count) {
            Some(index) => {
                prop_assert!(index < last);
                prop_assert_eq!(nav.input(), (index + 1).to_string());
            }
            None => prop_assert_eq!(nav.input(), (current + 1).to_string()),
        }
    }

    #[test]
    fn prop_numeric_commit_clamps(page in 1u32..10_000, page_count in 1usize..500) {
        let mut nav = PageNavigator::new(0);
        nav.set_input(page.to_string());
        let index = nav.commit(0, page_count);
        prop_assert_eq!(index, Some((page as usize).min(page_count) - 1));
    }
}

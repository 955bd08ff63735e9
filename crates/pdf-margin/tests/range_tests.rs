use pdf_margin::*;

#[test]
fn test_parse_mixed_ranges_and_pages() {
    let selection = PageSelection::parse("1-3,5", 10);
    assert_eq!(selection.indices(), &[0, 1, 2, 4]);
}

#[test]
fn test_parse_reversed_range_selects_nothing() {
    assert!(PageSelection::parse("5-2", 10).is_empty());
}

#[test]
fn test_parse_drops_out_of_range_pages() {
    assert!(PageSelection::parse("0,11", 10).is_empty());
}

#[test]
fn test_parse_drops_non_numeric_tokens() {
    let selection = PageSelection::parse("abc,2", 10);
    assert_eq!(selection.indices(), &[1]);
}

#[test]
fn test_parse_deduplicates_and_sorts() {
    let selection = PageSelection::parse("8, 2-4, 3, 1-2, 8", 10);
    assert_eq!(selection.indices(), &[0, 1, 2, 3, 7]);
}

#[test]
fn test_parse_trims_whitespace() {
    let selection = PageSelection::parse("  2 ,  4 - 5 ", 10);
    assert_eq!(selection.indices(), &[1, 3, 4]);
}

#[test]
fn test_parse_range_overlapping_end_is_truncated() {
    let selection = PageSelection::parse("3-20", 5);
    assert_eq!(selection.indices(), &[2, 3, 4]);
}

#[test]
fn test_parse_empty_and_degenerate_expressions() {
    assert!(PageSelection::parse("", 10).is_empty());
    assert!(PageSelection::parse(",,,", 10).is_empty());
    assert!(PageSelection::parse("-", 10).is_empty());
    assert!(PageSelection::parse("-3", 10).is_empty());
    assert!(PageSelection::parse("3-", 10).is_empty());
    assert!(PageSelection::parse("1-3", 0).is_empty());
}

#[test]
fn test_parse_results_are_always_normalized() {
    let expressions = [
        "1-3,5",
        "10-1, 4, 4, 4",
        "x-y, 2-2, 7-9, 0-1",
        "100, 3-4, -2, 9-",
        "1,2,3,4,5,6,7,8,9,10,11",
        "5-5,5",
    ];

    for total_pages in [0usize, 1, 4, 10] {
        for expression in expressions {
            let selection = PageSelection::parse(expression, total_pages);
            let indices = selection.indices();
            assert!(
                indices.windows(2).all(|w| w[0] < w[1]),
                "{:?} not strictly increasing for {}",
                indices,
                expression
            );
            assert!(indices.iter().all(|&i| i < total_pages));
        }
    }
}

#[test]
fn test_odd_and_even_use_one_based_parity() {
    assert_eq!(PageSelection::odd(5).indices(), &[0, 2, 4]);
    assert_eq!(PageSelection::even(5).indices(), &[1, 3]);
    assert!(PageSelection::even(1).is_empty());
    assert!(PageSelection::odd(0).is_empty());
}

#[test]
fn test_resolve_modes() {
    assert_eq!(PageSelection::resolve(&RangeMode::All, 3).indices(), &[0, 1, 2]);
    assert_eq!(PageSelection::resolve(&RangeMode::Odd, 4).indices(), &[0, 2]);
    assert_eq!(PageSelection::resolve(&RangeMode::Even, 4).indices(), &[1, 3]);
    assert_eq!(
        PageSelection::resolve(&RangeMode::Custom("2-3".to_string()), 4).indices(),
        &[1, 2]
    );
}

#[test]
fn test_blank_custom_expression_selects_every_page() {
    for expression in ["", "   "] {
        let mode = RangeMode::Custom(expression.to_string());
        assert_eq!(PageSelection::resolve(&mode, 3).indices(), &[0, 1, 2]);
    }
    // The parser itself still yields nothing for a blank expression
    assert!(PageSelection::parse("", 3).is_empty());
}

#[test]
fn test_selection_contains() {
    let selection = PageSelection::parse("2,4", 5);
    assert!(!selection.contains(0));
    assert!(selection.contains(1));
    assert!(selection.contains(3));
    assert!(!selection.contains(4));
    assert!(!PageSelection::none().contains(0));
}

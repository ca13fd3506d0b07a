use herald::feed::Pager;

#[test]
fn twenty_two_items_page_size_ten_clamp_scenario() {
    let mut pager = Pager::new((0..22).collect::<Vec<i32>>(), 10);

    assert_eq!(pager.total_pages(), 3);
    assert_eq!(pager.current_page(), 1);
    assert_eq!(pager.current_items().len(), 10);

    // Page 5 does not exist; the request lands on the last page.
    assert_eq!(pager.go_to_page(5), 3);
    assert_eq!(pager.current_items(), &[20, 21]);
    assert!(pager.has_prev_page());
    assert!(!pager.has_next_page());
}

#[test]
fn navigation_clamps_at_both_ends() {
    let mut pager = Pager::new((0..22).collect::<Vec<i32>>(), 10);

    assert_eq!(pager.prev_page(), 1);
    assert_eq!(pager.go_to_page(0), 1);

    assert_eq!(pager.next_page(), 2);
    assert_eq!(pager.current_items(), &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
    assert_eq!(pager.next_page(), 3);
    assert_eq!(pager.next_page(), 3);
}

#[test]
fn scroll_reset_latches_on_every_page_change() {
    let mut pager = Pager::new((0..22).collect::<Vec<i32>>(), 10);

    assert!(!pager.take_scroll_reset());

    pager.go_to_page(2);
    assert!(pager.take_scroll_reset());
    assert!(!pager.take_scroll_reset());

    // Even a jump to the page already shown returns the reader to the top.
    pager.go_to_page(2);
    assert!(pager.take_scroll_reset());
}

#[test]
fn empty_sequence_pins_to_page_one_with_no_items() {
    let mut pager = Pager::new(Vec::<i32>::new(), 10);

    assert_eq!(pager.total_pages(), 0);
    assert_eq!(pager.go_to_page(3), 1);
    assert!(pager.current_items().is_empty());
    assert!(!pager.has_next_page());
    assert!(!pager.has_prev_page());
}

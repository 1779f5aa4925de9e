//! Property-based tests for the pagination core
//!
//! Uses proptest to verify:
//! 1. Slice bounds and current page stay in range for any input
//! 2. Sliced data matches the computed page size
//! 3. Page windows are bounded, ascending and never hide a single page
//!    (including at the far end of the `usize` range)
//! 4. Controller navigation keeps the current page in range

use pagination_engine::{
    calculate_pagination, generate_page_numbers, paginate_array, types::MAX_VISIBLE_CAP, PageLabel,
    PaginationController,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_slice_bounds_invariant(
        total_items in 0usize..10_000,
        page in any::<i64>(),
        limit in 1usize..500,
    ) {
        let state = calculate_pagination(total_items, page, limit).unwrap();
        prop_assert!(state.start_index <= state.end_index);
        prop_assert!(state.end_index <= total_items);
        prop_assert!(state.current_page >= 1);
        prop_assert!(state.current_page <= state.total_pages.max(1));
        prop_assert_eq!(state.items_on_page, state.end_index - state.start_index);
        prop_assert!(state.items_on_page <= limit);
    }

    #[test]
    fn test_calculation_is_pure(
        total_items in 0usize..10_000,
        page in -50i64..500,
        limit in 1usize..100,
    ) {
        prop_assert_eq!(
            calculate_pagination(total_items, page, limit),
            calculate_pagination(total_items, page, limit)
        );
    }

    #[test]
    fn test_sliced_length_matches_items_on_page(
        items in proptest::collection::vec(any::<u8>(), 0..300),
        page in -5i64..40,
        limit in 1usize..50,
    ) {
        let page_data = paginate_array(&items, page, limit).unwrap();
        let state = calculate_pagination(items.len(), page, limit).unwrap();
        prop_assert_eq!(page_data.data.len(), state.items_on_page);
        prop_assert_eq!(&page_data.data[..], &items[state.start_index..state.end_index]);
    }

    #[test]
    fn test_page_window_is_bounded_for_any_input(
        total_pages in any::<usize>(),
        current_page in any::<usize>(),
        max_visible in any::<usize>(),
    ) {
        let labels = generate_page_numbers(current_page, total_pages, max_visible);
        prop_assert!(labels.len() <= MAX_VISIBLE_CAP + 4);

        let pages: Vec<usize> = labels.iter().filter_map(PageLabel::page).collect();
        prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        if total_pages > 0 {
            prop_assert_eq!(pages.first(), Some(&1));
            prop_assert_eq!(pages.last(), Some(&total_pages));
        }
    }

    #[test]
    fn test_page_window_shape(
        total_pages in 0usize..200,
        current_page in 0usize..220,
        max_visible in 1usize..12,
    ) {
        let labels = generate_page_numbers(current_page, total_pages, max_visible);
        let pages: Vec<usize> = labels.iter().filter_map(PageLabel::page).collect();

        prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(pages.iter().all(|page| (1..=total_pages).contains(page)));

        if total_pages <= max_visible {
            prop_assert_eq!(pages.len(), total_pages);
            prop_assert!(labels.iter().all(|label| !label.is_ellipsis()));
        } else {
            prop_assert_eq!(pages.first(), Some(&1));
            prop_assert_eq!(pages.last(), Some(&total_pages));
            prop_assert!(pages.contains(&current_page.clamp(1, total_pages)));
            let window = pages
                .iter()
                .filter(|page| **page != 1 && **page != total_pages)
                .count();
            // a lone hidden page next to either boundary is shown as itself
            prop_assert!(window <= max_visible + 2);
        }

        for (index, label) in labels.iter().enumerate() {
            if label.is_ellipsis() {
                let before = labels[index - 1].page().unwrap();
                let after = labels[index + 1].page().unwrap();
                // an ellipsis always stands for at least two pages
                prop_assert!(after - before > 2);
            }
        }
    }

    #[test]
    fn test_controller_navigation_stays_in_range(
        total in 0usize..300,
        limit in 1usize..40,
        moves in proptest::collection::vec((0u8..7, -20i64..60), 0..40),
    ) {
        let mut pager = PaginationController::new((0..total).collect::<Vec<_>>(), limit).unwrap();
        for (step, target) in moves {
            match step {
                0 => pager.next_page(),
                1 => pager.prev_page(),
                2 => pager.first_page(),
                3 => pager.last_page(),
                4 => pager.go_to_page(target),
                5 => pager.go_to_page(i64::MAX),
                _ => {
                    pager.change_limit(limit + 1).unwrap();
                    prop_assert_eq!(pager.current_page(), 1);
                }
            }
            prop_assert!(pager.current_page() >= 1);
            prop_assert!(pager.current_page() <= pager.total_pages().max(1));
            prop_assert!(pager.data().len() <= pager.limit());
        }
    }
}

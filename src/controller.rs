//! Client-side pagination over an in-memory collection.
//!
//! A [`PaginationController`] owns the `(current_page, limit)` pair for one
//! collection and derives everything else from it on demand. The current page
//! is kept inside `[1, max(total_pages, 1)]` after every transition.

use std::{num::NonZeroUsize, sync::Arc};

use log::debug;
use serde::Serialize;

use crate::{
    error::{PaginationError, PaginationResult},
    notifications::{PaginationEvent, SharedEventBus},
    settings::{preferred_limit, store_limit, SharedConfigStore},
    types::{
        pagination::{clamp_page, compute},
        generate_page_numbers, PageLabel, PaginationState, DEFAULT_MAX_VISIBLE,
    },
};

/// Everything a page control needs to render the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationView<T> {
    pub data: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub page_numbers: Vec<PageLabel>,
}

struct Hooks {
    view: String,
    events: Option<SharedEventBus>,
    store: Option<SharedConfigStore>,
}

pub struct PaginationController<T> {
    items: Arc<[T]>,
    current_page: usize,
    limit: NonZeroUsize,
    max_visible: usize,
    hooks: Hooks,
}

impl<T> PaginationController<T> {
    /// Fails when `initial_limit` is zero.
    pub fn new(items: impl Into<Arc<[T]>>, initial_limit: usize) -> PaginationResult<Self> {
        let limit = NonZeroUsize::new(initial_limit).ok_or(PaginationError::InvalidLimit(0))?;
        Ok(Self::with_limit(items, limit))
    }

    pub fn with_limit(items: impl Into<Arc<[T]>>, limit: NonZeroUsize) -> Self {
        Self {
            items: items.into(),
            current_page: 1,
            limit,
            max_visible: DEFAULT_MAX_VISIBLE,
            hooks: Hooks {
                view: String::new(),
                events: None,
                store: None,
            },
        }
    }

    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
    }

    /// Publishes state changes to `events`, tagged with `view`.
    pub fn with_event_bus(mut self, view: impl Into<String>, events: SharedEventBus) -> Self {
        self.hooks.view = view.into();
        self.hooks.events = Some(events);
        self
    }

    /// Persists the page size under `"<view>.limit"` and starts from the
    /// stored value when one exists.
    pub fn with_store(mut self, view: impl Into<String>, store: SharedConfigStore) -> Self {
        self.hooks.view = view.into();
        if let Some(limit) = preferred_limit(store.as_ref(), &self.hooks.view) {
            self.limit = limit;
            self.current_page = 1;
        }
        self.hooks.store = Some(store);
        self
    }

    pub fn name(&self) -> &str {
        &self.hooks.view
    }

    pub fn state(&self) -> PaginationState {
        compute(self.items.len(), self.current_page as i64, self.limit)
    }

    pub fn data(&self) -> &[T] {
        let state = self.state();
        &self.items[state.start_index..state.end_index]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.limit.get())
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn page_numbers(&self) -> Vec<PageLabel> {
        generate_page_numbers(self.current_page, self.total_pages(), self.max_visible)
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.set_page(clamp_page(page, self.total_pages()));
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.set_page(self.current_page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev_page() {
            self.set_page(self.current_page - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages().max(1));
    }

    /// Switches the page size and goes back to the first page. A zero limit is
    /// rejected and leaves the controller unchanged.
    pub fn change_limit(&mut self, new_limit: usize) -> PaginationResult<()> {
        let limit = NonZeroUsize::new(new_limit).ok_or(PaginationError::InvalidLimit(0))?;
        let previous = self.limit;
        self.limit = limit;
        self.set_page(1);

        if previous != limit {
            if let Some(store) = &self.hooks.store {
                store_limit(store.as_ref(), &self.hooks.view, limit);
            }
            self.publish(PaginationEvent::LimitChanged {
                view: self.hooks.view.clone(),
                from: previous.get(),
                to: limit.get(),
            });
        }
        Ok(())
    }

    /// Replaces the underlying collection, keeping the current page when it
    /// still exists.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        self.items = items.into();
        let page = clamp_page(self.current_page as i64, self.total_pages());
        self.current_page = page;
        self.publish(PaginationEvent::ItemsChanged {
            view: self.hooks.view.clone(),
            total_items: self.items.len(),
            current_page: page,
        });
    }

    fn set_page(&mut self, page: usize) {
        if page == self.current_page {
            return;
        }
        let from = self.current_page;
        self.current_page = page;
        debug!("View {:?} moved from page {} to {}", self.hooks.view, from, page);
        self.publish(PaginationEvent::PageChanged {
            view: self.hooks.view.clone(),
            from,
            to: page,
            total_pages: self.total_pages(),
        });
    }

    fn publish(&self, event: PaginationEvent) {
        if let Some(events) = &self.hooks.events {
            events.publish(event);
        }
    }
}

impl<T: Clone> PaginationController<T> {
    pub fn view(&self) -> PaginationView<T> {
        let state = self.state();
        PaginationView {
            data: self.data().to_vec(),
            current_page: state.current_page,
            total_pages: state.total_pages,
            total_items: state.total_items,
            limit: state.limit,
            has_next_page: state.has_next_page,
            has_prev_page: state.has_prev_page,
            page_numbers: self.page_numbers(),
        }
    }
}

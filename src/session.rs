//! Browse session state: pagination, group filter, debounced search,
//! favorites. Pure logic - the app shell issues the fetches this module
//! asks for and feeds the results back in.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::models::Channel;

pub const PAGE_SIZE: usize = 50;
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// The one network fetch the current state calls for. Non-empty search
/// text always wins over the group filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchSpec {
    Listing {
        page: usize,
        page_size: usize,
        group: Option<String>,
    },
    Search {
        query: String,
        page: usize,
        page_size: usize,
    },
}

/// Wire action produced by a favorite toggle
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteAction {
    Add {
        channel_id: String,
        list_name: String,
    },
    Remove {
        channel_id: String,
    },
}

pub struct SessionState {
    current_page: usize,
    page_size: usize,
    current_filter: Option<String>,
    current_search: String,
    total_channels: usize,
    pub channels: Vec<Channel>,
    pub groups: Vec<String>,
    pub favorites: HashSet<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
            current_filter: None,
            current_search: String::new(),
            total_channels: 0,
            channels: Vec::new(),
            groups: Vec::new(),
            favorites: HashSet::new(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_filter(&self) -> Option<&str> {
        self.current_filter.as_deref()
    }

    pub fn current_search(&self) -> &str {
        &self.current_search
    }

    pub fn total_channels(&self) -> usize {
        self.total_channels
    }

    pub fn total_pages(&self) -> usize {
        self.total_channels.div_ceil(self.page_size)
    }

    /// The fetch matching the active mode: search when search text is
    /// set, otherwise the (possibly group-filtered) listing.
    pub fn active_fetch(&self) -> FetchSpec {
        if self.current_search.is_empty() {
            FetchSpec::Listing {
                page: self.current_page,
                page_size: self.page_size,
                group: self.current_filter.clone(),
            }
        } else {
            FetchSpec::Search {
                query: self.current_search.clone(),
                page: self.current_page,
                page_size: self.page_size,
            }
        }
    }

    /// Select a group filter (None = "All Channels"). Resets to page 1.
    pub fn select_group(&mut self, group: Option<String>) -> FetchSpec {
        self.current_filter = group;
        self.current_page = 1;
        self.active_fetch()
    }

    /// A debounced search fired. Resets to page 1 of the search results.
    pub fn search_fired(&mut self, query: String) -> FetchSpec {
        self.current_search = query;
        self.current_page = 1;
        self.active_fetch()
    }

    /// Search input went empty: back to the listing, page 1.
    pub fn clear_search(&mut self) -> FetchSpec {
        self.current_search.clear();
        self.current_page = 1;
        self.active_fetch()
    }

    /// Step back one page. No-op on page 1.
    pub fn prev_page(&mut self) -> Option<FetchSpec> {
        if self.current_page <= 1 {
            return None;
        }
        self.current_page -= 1;
        Some(self.active_fetch())
    }

    /// Step forward one page. No-op on the last page.
    pub fn next_page(&mut self) -> Option<FetchSpec> {
        if self.current_page >= self.total_pages() {
            return None;
        }
        self.current_page += 1;
        Some(self.active_fetch())
    }

    /// Apply a loaded page. Responses are never cancelled, so whichever
    /// one lands last overwrites the display (last-response-wins).
    /// Keeps the page cursor inside [1, total_pages] afterwards.
    pub fn apply_page(&mut self, channels: Vec<Channel>, total: usize) {
        self.channels = channels;
        self.total_channels = total;
        let last = self.total_pages();
        if last == 0 {
            self.current_page = 1;
        } else if self.current_page > last {
            self.current_page = last;
        }
    }

    pub fn set_groups(&mut self, groups: Vec<String>) {
        self.groups = groups;
    }

    pub fn set_favorites(&mut self, favorites: HashSet<String>) {
        self.favorites = favorites;
    }

    pub fn is_favorite(&self, channel_id: &str) -> bool {
        self.favorites.contains(channel_id)
    }

    /// Optimistic toggle: the local set changes now, the returned action
    /// is sent to the server afterwards. A failed request is logged by
    /// the caller and the set is left as-is until the next reload.
    pub fn toggle_favorite(&mut self, channel_id: &str) -> FavoriteAction {
        if self.favorites.remove(channel_id) {
            FavoriteAction::Remove {
                channel_id: channel_id.to_string(),
            }
        } else {
            self.favorites.insert(channel_id.to_string());
            FavoriteAction::Add {
                channel_id: channel_id.to_string(),
                list_name: "default".to_string(),
            }
        }
    }
}

/// What a keystroke did to the debounce timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchInput {
    /// Timer (re)armed, query fires after the quiet period
    Armed,
    /// Input went empty: pending timer dropped, revert right away
    Cleared,
}

/// Timer-less search debounce, driven by `Instant`s from the caller so
/// it can be tested without sleeping. Every keystroke restarts the
/// quiet period; only `poll` past the deadline releases the query.
#[derive(Debug, Default)]
pub struct SearchDebounce {
    pending: Option<(String, Instant)>,
}

impl SearchDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&mut self, text: &str, now: Instant) -> SearchInput {
        if text.is_empty() {
            self.pending = None;
            SearchInput::Cleared
        } else {
            self.pending = Some((text.to_string(), now + SEARCH_DEBOUNCE));
            SearchInput::Armed
        }
    }

    /// Release the pending query once its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due {
            self.pending.take().map(|(query, _)| query)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

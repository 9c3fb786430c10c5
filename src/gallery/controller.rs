// SPDX-License-Identifier: MPL-2.0
//! Variant update guard.
//!
//! Re-renders are gated by a two-state machine: `Idle` accepts a request
//! for a different, known variant and moves to `Updating`; anything
//! received while `Updating` is dropped outright (never queued), and a
//! request for the already-current variant is a no-op. A render cannot be
//! cancelled once begun, so concurrent entry is prevented instead of
//! unwound.

use crate::catalog::{ProductCatalog, Variant};

/// Outcome of a variant-change request.
#[derive(Debug)]
pub enum Request<'a> {
    /// The request was accepted; the guard is now held until
    /// [`State::render_complete`].
    Accepted { variant: &'a Variant },
    /// The requested variant is already current.
    AlreadyCurrent,
    /// A render is in flight; the request is dropped, not deferred.
    Busy,
    /// The id is absent from the loaded catalog; state is untouched.
    NotFound,
}

/// Guard state. `is_updating` is true exactly between a request being
/// accepted and its render completing.
#[derive(Debug, Clone, Default)]
pub struct State {
    current_variant_id: Option<i64>,
    is_updating: bool,
}

impl State {
    /// Requests a switch to `id`. On acceptance the current variant id is
    /// updated and the guard is taken; every other outcome leaves the
    /// state untouched.
    pub fn request<'a>(&mut self, id: i64, catalog: &'a ProductCatalog) -> Request<'a> {
        if self.is_updating {
            return Request::Busy;
        }
        if self.current_variant_id == Some(id) {
            return Request::AlreadyCurrent;
        }
        let Some(variant) = catalog.find_variant(id) else {
            return Request::NotFound;
        };

        self.is_updating = true;
        self.current_variant_id = Some(id);
        Request::Accepted { variant }
    }

    /// Releases the guard after the render finished.
    pub fn render_complete(&mut self) {
        self.is_updating = false;
    }

    #[must_use]
    pub fn current_variant_id(&self) -> Option<i64> {
        self.current_variant_id
    }

    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.is_updating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variant;

    fn catalog_with(ids: &[i64]) -> ProductCatalog {
        ProductCatalog {
            variants: ids
                .iter()
                .map(|&id| Variant {
                    id,
                    title: format!("Variant {id}"),
                    featured_media_id: None,
                    custom_images: vec![],
                })
                .collect(),
            media: vec![],
        }
    }

    #[test]
    fn accepts_new_variant_and_takes_guard() {
        let catalog = catalog_with(&[1, 2]);
        let mut state = State::default();

        let outcome = state.request(1, &catalog);
        assert!(matches!(outcome, Request::Accepted { variant } if variant.id == 1));
        assert!(state.is_updating());
        assert_eq!(state.current_variant_id(), Some(1));
    }

    #[test]
    fn drops_requests_while_updating() {
        let catalog = catalog_with(&[1, 2]);
        let mut state = State::default();
        let _ = state.request(1, &catalog);

        let outcome = state.request(2, &catalog);
        assert!(matches!(outcome, Request::Busy));
        // The dropped request is lost, not deferred.
        assert_eq!(state.current_variant_id(), Some(1));
    }

    #[test]
    fn same_variant_is_a_no_op() {
        let catalog = catalog_with(&[1]);
        let mut state = State::default();
        let _ = state.request(1, &catalog);
        state.render_complete();

        let outcome = state.request(1, &catalog);
        assert!(matches!(outcome, Request::AlreadyCurrent));
        assert!(!state.is_updating());
    }

    #[test]
    fn unknown_variant_leaves_state_untouched() {
        let catalog = catalog_with(&[1]);
        let mut state = State::default();
        let _ = state.request(1, &catalog);
        state.render_complete();

        let outcome = state.request(99, &catalog);
        assert!(matches!(outcome, Request::NotFound));
        assert_eq!(state.current_variant_id(), Some(1));
        assert!(!state.is_updating());
    }

    #[test]
    fn render_complete_returns_to_idle() {
        let catalog = catalog_with(&[1, 2]);
        let mut state = State::default();
        let _ = state.request(1, &catalog);
        state.render_complete();

        let outcome = state.request(2, &catalog);
        assert!(matches!(outcome, Request::Accepted { .. }));
        assert_eq!(state.current_variant_id(), Some(2));
    }
}

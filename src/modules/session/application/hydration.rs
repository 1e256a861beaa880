// src/modules/session/application/hydration.rs
//
// Re-hydration eligibility as pure functions of explicit state, so the
// "when may the store overwrite an edit buffer" rules live in one place
// instead of being scattered across handler flags.

use crate::session::application::edit_session::{Phase, Section};

/// Whether a background store change may overwrite `section`'s buffer.
///
/// Ambient re-hydration is frozen entirely while the experience or
/// timeline tab is active (those forms are the most keystroke-heavy), and
/// a section is never overwritten while its own tab is the active one or
/// while its save is in flight. The timeline has a stricter policy of its
/// own, so it never qualifies here.
pub fn ambient_rehydration_allowed(
    section: Section,
    phase: &Phase,
    active_tab: Section,
    store_loading: bool,
) -> bool {
    if store_loading {
        return false;
    }
    if matches!(phase, Phase::Uninitialized | Phase::Saving) {
        return false;
    }
    if matches!(active_tab, Section::Experience | Section::Timeline) {
        return false;
    }
    if section == active_tab {
        return false;
    }
    !matches!(section, Section::Timeline)
}

/// The timeline buffer re-hydrates only when no just-saved grace window is
/// active and the cached list's length differs from the buffer's (an empty
/// buffer always syncs). Equal-length lists are assumed unchanged: edit
/// safety is traded for perfect freshness.
pub fn timeline_rehydration_allowed(
    phase: &Phase,
    grace_active: bool,
    buffer_len: usize,
    cached_len: usize,
) -> bool {
    if matches!(phase, Phase::Uninitialized | Phase::Saving) {
        return false;
    }
    if grace_active {
        return false;
    }
    buffer_len == 0 || buffer_len != cached_len
}

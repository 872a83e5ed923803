//! Selection state coupled to the viewport zoom.
//!
//! Two explicit states: [`Selection::None`] and [`Selection::One`]. Only the
//! `None -> One` transition shrinks the zoom (to make room for the side
//! panel), and only the `One -> None` transition restores it. Switching the
//! inspected node while the panel is open leaves the zoom alone.

use serde::Serialize;

use crate::tree::NodeId;

use super::controller::ViewportController;

/// Current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    None,
    One(NodeId),
}

/// What a call to [`SelectionCoupler::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing was selected before; the panel opens and zoom shrinks.
    Opened,
    /// A different node is now inspected; zoom unchanged.
    Switched,
    /// The node was already selected.
    Unchanged,
}

/// Tracks the selected node and applies the panel zoom nudge.
#[derive(Debug, Clone, Default)]
pub struct SelectionCoupler {
    selection: Selection,
}

impl SelectionCoupler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected node id, if any.
    pub fn selected(&self) -> Option<&NodeId> {
        match &self.selection {
            Selection::None => None,
            Selection::One(id) => Some(id),
        }
    }

    /// The side panel is open exactly when a node is selected.
    pub fn is_open(&self) -> bool {
        matches!(self.selection, Selection::One(_))
    }

    pub fn select(&mut self, id: NodeId, viewport: &mut ViewportController) -> SelectionChange {
        let change = match &self.selection {
            Selection::None => {
                viewport.shrink_for_panel();
                SelectionChange::Opened
            }
            Selection::One(current) if *current == id => SelectionChange::Unchanged,
            Selection::One(_) => SelectionChange::Switched,
        };
        tracing::debug!(node = %id, ?change, "node selected");
        self.selection = Selection::One(id);
        change
    }

    /// Clear the selection. Returns `false` if nothing was selected, in which
    /// case the zoom is left untouched.
    pub fn deselect(&mut self, viewport: &mut ViewportController) -> bool {
        if let Selection::One(id) = std::mem::take(&mut self.selection) {
            viewport.restore_from_panel();
            tracing::debug!(node = %id, "selection cleared");
            true
        } else {
            false
        }
    }
}

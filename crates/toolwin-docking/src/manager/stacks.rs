//! Side and activation stacks.
//!
//! The side stack remembers, per anchor, the docked windows that were
//! hidden because another window took their slot. The active stack records
//! activation history so hiding the active window can re-activate the
//! previous one.

use toolwin_common::{Anchor, ToolWindowId};

use crate::model::WindowInfo;

#[derive(Debug, Default)]
pub struct SideStack {
    stacks: [Vec<WindowInfo>; 4],
}

impl SideStack {
    /// Push a snapshot of a window that was pushed out of its slot.
    pub fn push(&mut self, info: WindowInfo) {
        let stack = &mut self.stacks[info.anchor.index()];
        stack.retain(|i| i.id != info.id);
        stack.push(info);
    }

    pub fn pop(&mut self, anchor: Anchor) -> Option<WindowInfo> {
        self.stacks[anchor.index()].pop()
    }

    /// Pop the most recent snapshot on `anchor` that satisfies `pred`,
    /// leaving the others in place.
    pub fn pop_matching(
        &mut self,
        anchor: Anchor,
        pred: impl Fn(&WindowInfo) -> bool,
    ) -> Option<WindowInfo> {
        let stack = &mut self.stacks[anchor.index()];
        let pos = stack.iter().rposition(pred)?;
        Some(stack.remove(pos))
    }

    pub fn peek(&self, anchor: Anchor) -> Option<&WindowInfo> {
        self.stacks[anchor.index()].last()
    }

    pub fn clear(&mut self, anchor: Anchor) {
        self.stacks[anchor.index()].clear();
    }

    pub fn remove(&mut self, id: &ToolWindowId) {
        for stack in &mut self.stacks {
            stack.retain(|i| &i.id != id);
        }
    }

    pub fn len(&self, anchor: Anchor) -> usize {
        self.stacks[anchor.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(Vec::is_empty)
    }
}

#[derive(Debug, Default)]
pub struct ActiveStack {
    ids: Vec<ToolWindowId>,
}

impl ActiveStack {
    /// Move `id` to the top.
    pub fn push(&mut self, id: ToolWindowId) {
        self.ids.retain(|i| i != &id);
        self.ids.push(id);
    }

    pub fn pop(&mut self) -> Option<ToolWindowId> {
        self.ids.pop()
    }

    pub fn peek(&self) -> Option<&ToolWindowId> {
        self.ids.last()
    }

    pub fn remove(&mut self, id: &ToolWindowId) {
        self.ids.retain(|i| i != id);
    }

    pub fn contains(&self, id: &ToolWindowId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

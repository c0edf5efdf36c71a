//! Allocation reconciler: the one-shot post-shift screen where the tracked
//! shift total is redistributed across tasks under a conservation clamp.

use crate::core::variant::Variant;
use crate::models::summary::ShiftSummary;
use crate::models::task::Task;
use crate::utils::time::round_to_minute;
use std::collections::BTreeMap;

/// Warning raised whenever an edit gets clamped against the budget.
pub const ALLOCATION_LIMIT_NOTICE: &str = "Total shift hours cannot exceed 8:00.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationField {
    Tracked,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Submitted,
    /// Under-allocated: the caller must prompt ("submit anyway?") and either
    /// proceed or cancel back to editing.
    NeedsConfirmation,
    /// Over-allocated: submission is disabled.
    Blocked,
}

/// Result of one edit. Invalid input is never rejected; the applied value is
/// the nearest valid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedAllocation {
    pub seconds: i64,
    pub clamped: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AllocationEntry {
    pub tracked: i64,
    pub manual: i64,
    /// Tracked seconds this task arrived with, minute-rounded. Marker for the
    /// tracked/untracked breakdown; zero where no per-task tracking exists.
    pub original_tracked: i64,
    pub note: Option<String>,
}

impl AllocationEntry {
    pub fn allocated(&self) -> i64 {
        self.tracked + self.manual
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationTotals {
    pub allocated: i64,
    pub tracked: i64,
    pub untracked: i64,
    pub remaining: i64,
}

#[derive(Debug)]
pub struct AllocationPlan {
    variant: Variant,
    goal_seconds: i64,
    shift_total_seconds: i64,
    /// Sum of minute-rounded tracked seconds the shift produced. Tracked
    /// edits may redistribute this pool but never exceed it.
    tracked_pool: i64,
    entries: BTreeMap<u32, AllocationEntry>,
    order: Vec<u32>,
    confirming: bool,
    submitted: bool,
}

impl AllocationPlan {
    /// Seed from the finalized shift. v1 pre-allocates the whole shift total
    /// onto the first catalog task; tracking variants seed each task from its
    /// ledger snapshot, rounded to the nearest minute, with manual at zero.
    pub fn seed(
        variant: Variant,
        catalog: &[Task],
        summary: &ShiftSummary,
        goal_seconds: i64,
    ) -> Self {
        let order: Vec<u32> = catalog.iter().map(|t| t.id).collect();
        let mut entries = BTreeMap::new();
        let mut tracked_pool = 0;

        for (index, task) in catalog.iter().enumerate() {
            let mut entry = AllocationEntry::default();

            if variant.has_task_tracking() {
                let rounded =
                    round_to_minute(summary.task_seconds.get(&task.id).copied().unwrap_or(0));
                entry.tracked = rounded;
                entry.original_tracked = rounded;
                tracked_pool += rounded;
            } else if index == 0 {
                entry.tracked = summary.total_seconds;
            }

            entries.insert(task.id, entry);
        }

        Self {
            variant,
            goal_seconds,
            shift_total_seconds: summary.total_seconds,
            tracked_pool,
            entries,
            order,
            confirming: false,
            submitted: false,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn goal_seconds(&self) -> i64 {
        self.goal_seconds
    }

    pub fn shift_total_seconds(&self) -> i64 {
        self.shift_total_seconds
    }

    pub fn tracked_pool(&self) -> i64 {
        self.tracked_pool
    }

    pub fn entry(&self, task_id: u32) -> Option<&AllocationEntry> {
        self.entries.get(&task_id)
    }

    /// Entries in catalog order, for display and export.
    pub fn entries_in_order(&self) -> impl Iterator<Item = (u32, &AllocationEntry)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| (*id, e)))
    }

    fn tracked_field_total(&self) -> i64 {
        self.entries.values().map(|e| e.tracked).sum()
    }

    /// Apply one edit. Clamps to non-negative, clamps tracked edits against
    /// the tracked pool (split variants), and clamps the grand total to the
    /// remaining budget; the edit always lands on a valid value. Returns
    /// `None` for an unknown task or a field the variant does not have.
    pub fn set_allocation(
        &mut self,
        task_id: u32,
        field: AllocationField,
        seconds: i64,
    ) -> Option<AppliedAllocation> {
        if !self.entries.contains_key(&task_id) {
            return None;
        }
        if field == AllocationField::Manual && !self.variant.has_manual_split() {
            return None;
        }

        let old = {
            let entry = &self.entries[&task_id];
            match field {
                AllocationField::Tracked => entry.tracked,
                AllocationField::Manual => entry.manual,
            }
        };

        let mut value = seconds.max(0);

        // Compare against the remaining budget rather than summing, so
        // adversarially large inputs cannot overflow.
        if field == AllocationField::Tracked && self.variant.has_manual_split() {
            let other_tracked = self.tracked_field_total() - old;
            if value > self.tracked_pool - other_tracked {
                value = (self.tracked_pool - other_tracked).max(0);
            }
        }

        // An over-full seed (uncapped ledger snapshot) leaves no budget at
        // all, so the floor at zero still applies.
        let other_total = self.totals().allocated - old;
        if value > self.goal_seconds - other_total {
            value = (self.goal_seconds - other_total).max(0);
        }

        let clamped = value != seconds;

        let entry = self.entries.get_mut(&task_id)?;
        match field {
            AllocationField::Tracked => entry.tracked = value,
            AllocationField::Manual => entry.manual = value,
        }

        Some(AppliedAllocation {
            seconds: value,
            clamped,
        })
    }

    /// Attach a note to a task's allocation. Only the attachments variant
    /// carries notes; elsewhere this is a no-op returning false.
    pub fn set_note(&mut self, task_id: u32, note: String) -> bool {
        if !self.variant.has_attachments() {
            return false;
        }
        match self.entries.get_mut(&task_id) {
            Some(entry) => {
                entry.note = Some(note);
                true
            }
            None => false,
        }
    }

    /// Totals for the summary header. The tracked/untracked breakdown depends
    /// on the variant: split variants sum the two fields directly, v3 compares
    /// each task against its original tracked marker, and v1 compares the
    /// grand total against the shift total.
    pub fn totals(&self) -> AllocationTotals {
        let mut allocated = 0;
        let mut tracked = 0;
        let mut untracked = 0;

        match self.variant {
            Variant::V2 | Variant::V4 => {
                for entry in self.entries.values() {
                    tracked += entry.tracked;
                    untracked += entry.manual;
                    allocated += entry.allocated();
                }
            }
            Variant::V3 => {
                for entry in self.entries.values() {
                    let value = entry.tracked;
                    allocated += value;
                    tracked += value.min(entry.original_tracked);
                    untracked += (value - entry.original_tracked).max(0);
                }
            }
            Variant::V1 => {
                for entry in self.entries.values() {
                    allocated += entry.tracked;
                }
                tracked = allocated.min(self.shift_total_seconds);
                untracked = (allocated - self.shift_total_seconds).max(0);
            }
        }

        AllocationTotals {
            allocated,
            tracked,
            untracked,
            remaining: self.goal_seconds - allocated,
        }
    }

    /// Submit. Exactly at the ceiling submits immediately; under the ceiling
    /// asks for confirmation; over the ceiling is blocked entirely.
    pub fn confirm(&mut self) -> ConfirmOutcome {
        let totals = self.totals();

        if totals.remaining < 0 {
            return ConfirmOutcome::Blocked;
        }
        if totals.allocated < self.goal_seconds {
            self.confirming = true;
            return ConfirmOutcome::NeedsConfirmation;
        }

        self.submitted = true;
        ConfirmOutcome::Submitted
    }

    /// Proceed past the under-allocation prompt. Terminal.
    pub fn proceed_under_allocation(&mut self) -> ConfirmOutcome {
        self.confirming = false;
        self.submitted = true;
        ConfirmOutcome::Submitted
    }

    /// Dismiss the prompt and return to editing with no state change.
    pub fn cancel_confirmation(&mut self) {
        self.confirming = false;
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}

use shiftclock::core::allocation::{
    AllocationField, AllocationPlan, ConfirmOutcome,
};
use shiftclock::core::shift::SHIFT_GOAL_SECONDS;
use shiftclock::core::variant::Variant;
use shiftclock::models::summary::ShiftSummary;
use shiftclock::models::task::task_catalog;
use std::collections::BTreeMap;

fn summary_with_total(total_seconds: i64) -> ShiftSummary {
    ShiftSummary {
        total_seconds,
        ..Default::default()
    }
}

fn summary_with_tasks(total_seconds: i64, tasks: &[(u32, i64)]) -> ShiftSummary {
    ShiftSummary {
        total_seconds,
        task_seconds: tasks.iter().copied().collect::<BTreeMap<u32, i64>>(),
        ..Default::default()
    }
}

fn seed(variant: Variant, summary: &ShiftSummary) -> AllocationPlan {
    AllocationPlan::seed(variant, &task_catalog(), summary, SHIFT_GOAL_SECONDS)
}

#[test]
fn test_v1_seeds_whole_total_onto_first_task() {
    let mut plan = seed(Variant::V1, &summary_with_total(3_600));

    assert_eq!(plan.entry(1).unwrap().allocated(), 3_600);
    for id in [2, 3, 4] {
        assert_eq!(plan.entry(id).unwrap().allocated(), 0);
    }
    assert_eq!(plan.totals().allocated, 3_600);

    // 3600 < 28800, so confirming triggers the under-allocation prompt.
    assert_eq!(plan.confirm(), ConfirmOutcome::NeedsConfirmation);
}

#[test]
fn test_tracking_variants_seed_minute_rounded_snapshots() {
    let summary = summary_with_tasks(7_500, &[(1, 3_890), (2, 29)]);
    let plan = seed(Variant::V4, &summary);

    // 3890 s rounds to 65 min, 29 s rounds away to zero.
    assert_eq!(plan.entry(1).unwrap().tracked, 3_900);
    assert_eq!(plan.entry(2).unwrap().tracked, 0);
    assert_eq!(plan.entry(1).unwrap().manual, 0);
    assert_eq!(plan.tracked_pool(), 3_900);
}

#[test]
fn test_negative_input_clamps_to_zero() {
    let mut plan = seed(Variant::V1, &summary_with_total(3_600));

    let applied = plan
        .set_allocation(2, AllocationField::Tracked, -500)
        .unwrap();
    assert_eq!(applied.seconds, 0);
    assert!(applied.clamped);
}

#[test]
fn test_grand_total_never_exceeds_ceiling() {
    let mut plan = seed(Variant::V1, &summary_with_total(3_600));

    // Adversarially large edit lands on exactly the remaining budget.
    let applied = plan
        .set_allocation(2, AllocationField::Tracked, i64::MAX)
        .unwrap();
    assert!(applied.clamped);
    assert_eq!(applied.seconds, SHIFT_GOAL_SECONDS - 3_600);
    assert_eq!(plan.totals().allocated, SHIFT_GOAL_SECONDS);
    assert_eq!(plan.totals().remaining, 0);

    // Any further raise on another task gets squeezed to zero.
    let applied = plan
        .set_allocation(3, AllocationField::Tracked, 60)
        .unwrap();
    assert_eq!(applied.seconds, 0);
    assert_eq!(plan.totals().allocated, SHIFT_GOAL_SECONDS);
}

#[test]
fn test_conservation_holds_under_adversarial_sequences() {
    let summary = summary_with_tasks(7_200, &[(1, 3_600), (2, 1_800)]);
    let mut plan = seed(Variant::V2, &summary);

    let edits: [(u32, AllocationField, i64); 6] = [
        (1, AllocationField::Manual, i64::MAX),
        (2, AllocationField::Tracked, i64::MAX),
        (3, AllocationField::Manual, 999_999_999),
        (4, AllocationField::Tracked, -4),
        (1, AllocationField::Tracked, 0),
        (2, AllocationField::Manual, 28_800),
    ];

    for (id, field, seconds) in edits {
        plan.set_allocation(id, field, seconds);
        let totals = plan.totals();
        assert!(totals.allocated <= SHIFT_GOAL_SECONDS);
        assert!(totals.tracked <= plan.tracked_pool());
    }
}

#[test]
fn test_tracked_edits_capped_by_tracked_pool() {
    let summary = summary_with_tasks(5_400, &[(1, 3_600), (2, 1_800)]);
    let mut plan = seed(Variant::V4, &summary);
    assert_eq!(plan.tracked_pool(), 5_400);

    // Tracked time can move between tasks but not grow the pool.
    let applied = plan
        .set_allocation(3, AllocationField::Tracked, 7_200)
        .unwrap();
    assert!(applied.clamped);
    assert_eq!(applied.seconds, 0); // pool fully held by tasks 1 and 2

    plan.set_allocation(1, AllocationField::Tracked, 0);
    let applied = plan
        .set_allocation(3, AllocationField::Tracked, 7_200)
        .unwrap();
    assert_eq!(applied.seconds, 3_600); // freed share of the pool

    // Manual time is not pool-limited, only budget-limited.
    let applied = plan
        .set_allocation(1, AllocationField::Manual, 10_000)
        .unwrap();
    assert_eq!(applied.seconds, 10_000);
}

#[test]
fn test_manual_field_unavailable_without_split() {
    let mut plan = seed(Variant::V3, &summary_with_tasks(3_600, &[(1, 3_600)]));

    assert!(
        plan.set_allocation(1, AllocationField::Manual, 600)
            .is_none()
    );
    assert!(plan.set_allocation(9, AllocationField::Tracked, 600).is_none());
}

#[test]
fn test_v3_tracked_untracked_split_against_original() {
    let mut plan = seed(Variant::V3, &summary_with_tasks(3_600, &[(1, 3_600)]));

    // Move half of task 1's time up onto task 2: the reallocated share
    // counts as untracked because task 2 never tracked it.
    plan.set_allocation(1, AllocationField::Tracked, 1_800);
    plan.set_allocation(2, AllocationField::Tracked, 1_800);

    let totals = plan.totals();
    assert_eq!(totals.allocated, 3_600);
    assert_eq!(totals.tracked, 1_800);
    assert_eq!(totals.untracked, 1_800);
}

#[test]
fn test_exact_allocation_submits_immediately() {
    let mut plan = seed(Variant::V1, &summary_with_total(SHIFT_GOAL_SECONDS));

    assert_eq!(plan.confirm(), ConfirmOutcome::Submitted);
    assert!(plan.is_submitted());
}

#[test]
fn test_under_allocation_prompt_can_cancel_then_proceed() {
    let mut plan = seed(Variant::V1, &summary_with_total(3_600));

    assert_eq!(plan.confirm(), ConfirmOutcome::NeedsConfirmation);
    assert!(plan.is_confirming());

    // Cancelling returns to editing with no state change.
    plan.cancel_confirmation();
    assert!(!plan.is_confirming());
    assert!(!plan.is_submitted());
    assert_eq!(plan.totals().allocated, 3_600);

    assert_eq!(plan.confirm(), ConfirmOutcome::NeedsConfirmation);
    assert_eq!(plan.proceed_under_allocation(), ConfirmOutcome::Submitted);
    assert!(plan.is_submitted());
}

#[test]
fn test_over_allocated_seed_blocks_submission() {
    // An uncapped ledger snapshot (high multiplier) can seed past the
    // ceiling; submission is disabled rather than silently truncated.
    let summary = summary_with_tasks(28_800, &[(1, 30_000)]);
    let mut plan = seed(Variant::V3, &summary);

    assert!(plan.totals().remaining < 0);
    assert_eq!(plan.confirm(), ConfirmOutcome::Blocked);
    assert!(!plan.is_submitted());
}

#[test]
fn test_notes_only_on_attachment_variant() {
    let mut v3 = seed(Variant::V3, &summary_with_tasks(3_600, &[(1, 3_600)]));
    assert!(v3.set_note(1, "replaced cracked module".to_string()));
    assert_eq!(
        v3.entry(1).unwrap().note.as_deref(),
        Some("replaced cracked module")
    );

    let mut v2 = seed(Variant::V2, &summary_with_tasks(3_600, &[(1, 3_600)]));
    assert!(!v2.set_note(1, "nope".to_string()));
    assert_eq!(v2.entry(1).unwrap().note, None);
}

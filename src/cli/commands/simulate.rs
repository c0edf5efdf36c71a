//! The `simulate` command: drives one full shift through the engine on a
//! virtual clock (geofence, clock in, task script, clock out, allocation,
//! confirmation, optional report export). This is the CLI stand-in for the
//! app's timer and allocation screens.

use crate::cli::parser::Commands;
use crate::config::{Config, MULTIPLIER_PRESETS};
use crate::core::allocation::{
    ALLOCATION_LIMIT_NOTICE, AllocationField, AllocationPlan, ConfirmOutcome,
};
use crate::core::engine::{AUTO_CLOCK_OUT_NOTICE, EngineEvent, ShiftEngine};
use crate::core::geofence::GeofenceEvaluator;
use crate::core::ledger::ToggleOutcome;
use crate::core::position::{DeniedPositionSource, PositionSource, PositionWatch, SimulatedPositionSource};
use crate::core::shift::ClockInOutcome;
use crate::core::variant::Variant;
use crate::errors::{AppError, AppResult};
use crate::export::{ShiftReport, write_report};
use crate::models::event::ClockEvent;
use crate::models::project::find_project;
use crate::models::summary::ShiftSummary;
use crate::models::task::{Task, find_task, task_catalog};
use crate::ui::messages;
use crate::utils::clock::{Clock, ManualClock};
use crate::utils::colors::{RESET, color_for_remaining, colorize_timer};
use crate::utils::formatting::{bold, secs2readable};
use crate::utils::table::Table;
use crate::utils::time::{format_hm, format_hms, parse_duration};
use ansi_term::Colour;
use chrono::Local;
use std::cell::Cell;
use std::rc::Rc;

/// Distance the walker "jumps" to when leaving the site mid-shift.
const OFF_SITE_MARGIN_M: f64 = 100_000.0;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Simulate {
        project,
        variant,
        multiplier,
        distance,
        radius,
        override_geofence,
        no_location,
        work,
        run_task,
        exit_site_after,
        allocate,
        note,
        yes,
        format,
        out,
    } = cmd
    else {
        return Ok(());
    };

    // -----------------------------
    // Resolve knobs: CLI flag wins over config
    // -----------------------------
    let variant = match variant {
        Some(code) => Variant::from_code(code)?,
        None => cfg.variant()?,
    };
    let multiplier = (*multiplier).unwrap_or(cfg.time_multiplier);
    if !MULTIPLIER_PRESETS.contains(&multiplier) {
        return Err(AppError::InvalidMultiplier(multiplier));
    }
    let radius = (*radius).unwrap_or(cfg.geofence_radius_m);
    let override_on = (*override_geofence).unwrap_or(cfg.geofence_override);
    let goal_seconds = cfg.shift_goal_seconds()?;

    let project_id = (*project).unwrap_or(1);
    let project = find_project(project_id).ok_or(AppError::UnknownProject(project_id))?;
    let catalog = task_catalog();

    // -----------------------------
    // Parse the shift script
    // -----------------------------
    let task_script = parse_task_script(run_task, &catalog)?;
    let work_seconds = match work {
        Some(dur) => parse_duration(dur)?,
        None => 0,
    };
    let exit_after = match exit_site_after {
        Some(dur) => Some(parse_duration(dur)?),
        None => None,
    };

    // -----------------------------
    // Build the engine
    // -----------------------------
    let site = cfg.site_location();
    let distance_knob = Rc::new(Cell::new((*distance).unwrap_or(cfg.simulated_distance_m)));

    let source: Box<dyn PositionSource> = if *no_location {
        Box::new(DeniedPositionSource)
    } else {
        Box::new(SimulatedPositionSource::new(site, Rc::clone(&distance_knob)))
    };
    let geofence = GeofenceEvaluator::new(site, radius).with_manual_override(override_on);
    let mut engine = ShiftEngine::new(
        variant,
        multiplier,
        goal_seconds,
        geofence,
        PositionWatch::subscribe(source),
        &catalog,
    );

    let mut clock = ManualClock::starting_at(Local::now());

    messages::header(format!(
        "Simulating {} at {} (x{})",
        variant.code(),
        project.name,
        multiplier
    ));

    // First position delivery, then report the fence status
    engine.advance_to(clock.now());
    print_geofence_status(&engine, radius);

    // -----------------------------
    // Clock in
    // -----------------------------
    match engine.clock_in(clock.now()) {
        ClockInOutcome::ClockedIn => {
            messages::success(format!("Clocked in at {}", clock.now().format("%H:%M:%S")));
        }
        ClockInOutcome::OutsideGeofence => {
            messages::warning("You must be inside the job site to clock in.");
            engine.teardown();
            return Ok(());
        }
        ClockInOutcome::AlreadyClockedIn => {}
    }

    // -----------------------------
    // Run the scripted shift
    // -----------------------------
    let mut elapsed = 0i64;
    let mut summary: Option<ShiftSummary> = None;

    for (task_id, duration) in &task_script {
        match engine.toggle_task(*task_id, clock.now()) {
            ToggleOutcome::Started => {
                messages::info(format!("Task {} started", task_label(&catalog, *task_id)));
            }
            ToggleOutcome::Switched { from } => {
                messages::info(format!(
                    "Task {} stopped, task {} started",
                    task_label(&catalog, from),
                    task_label(&catalog, *task_id)
                ));
            }
            ToggleOutcome::Stopped => {
                messages::info(format!("Task {} stopped", task_label(&catalog, *task_id)));
            }
            ToggleOutcome::Ignored => {
                messages::warning("Task timers need an active shift and a v2+ variant.");
            }
        }

        summary = advance(
            &mut engine,
            &mut clock,
            *duration,
            &mut elapsed,
            exit_after,
            &distance_knob,
            radius,
        );
        if summary.is_some() {
            break;
        }
    }

    if summary.is_none() && work_seconds > 0 {
        summary = advance(
            &mut engine,
            &mut clock,
            work_seconds,
            &mut elapsed,
            exit_after,
            &distance_knob,
            radius,
        );
    }

    // Manual clock-out unless an automatic condition already fired
    let summary = match summary {
        Some(s) => s,
        None => match engine.clock_out(clock.now()) {
            Some(s) => s,
            None => {
                messages::warning("Shift already ended.");
                engine.teardown();
                return Ok(());
            }
        },
    };
    messages::info(format!("Clocked out at {}", clock.now().format("%H:%M:%S")));

    print_shift_results(&summary, &catalog, variant);

    // -----------------------------
    // Allocation screen
    // -----------------------------
    let mut plan = AllocationPlan::seed(variant, &catalog, &summary, goal_seconds);

    apply_notes(&mut plan, note, &catalog)?;
    apply_edits(&mut plan, allocate, &catalog)?;

    print_allocation(&plan, &catalog);

    let submitted = run_confirmation(&mut plan, *yes);

    if let Some(path) = out {
        let report = ShiftReport::build(&project.name, &catalog, &summary, &plan);
        write_report(format, path, &report)?;
    }

    engine.teardown();

    if submitted {
        messages::success("Allocation submitted for approval.");
    }

    Ok(())
}

/// Advance the virtual clock one second at a time, delivering position
/// updates and periodic checks. Returns the shift summary as soon as an
/// automatic clock-out condition ends the shift.
fn advance(
    engine: &mut ShiftEngine,
    clock: &mut ManualClock,
    seconds: i64,
    elapsed: &mut i64,
    exit_after: Option<i64>,
    distance_knob: &Rc<Cell<f64>>,
    radius: f64,
) -> Option<ShiftSummary> {
    for _ in 0..seconds {
        if let Some(exit_at) = exit_after
            && *elapsed == exit_at
        {
            distance_knob.set(radius + OFF_SITE_MARGIN_M);
        }

        clock.advance_secs(1);
        *elapsed += 1;

        for event in engine.advance_to(clock.now()) {
            match event {
                EngineEvent::AutoClockedOut(summary) => {
                    messages::banner(AUTO_CLOCK_OUT_NOTICE);
                    return Some(summary);
                }
                EngineEvent::ShiftComplete(summary) => {
                    return Some(summary);
                }
            }
        }
    }
    None
}

fn print_geofence_status(engine: &ShiftEngine, radius: f64) {
    let state = engine.geofence_state();

    if let Some(err) = &state.error {
        messages::error(err);
        if !engine.effective_is_inside() {
            messages::info("Clock-in stays blocked until a location fix arrives.");
        }
        return;
    }

    match (state.distance_m, state.is_inside) {
        (Some(distance), Some(inside)) => {
            let side = if inside { "inside" } else { "outside" };
            messages::info(format!(
                "Distance from site: {:.0} m (radius {:.0} m), {} the geofence",
                distance, radius, side
            ));
        }
        _ => messages::info("Waiting for a location fix…"),
    }

    if engine.effective_is_inside() && state.is_inside != Some(true) {
        messages::info("Geofence override is ON.");
    }
}

fn print_clock_log(log: &[ClockEvent]) {
    let mut table = Table::new(&["Event", "Time"]);
    for ev in log {
        let colour = if ev.kind.is_in() {
            Colour::Green
        } else {
            Colour::Red
        };
        table.add_row(vec![
            colour.paint(ev.kind.et_as_str()).to_string(),
            ev.time_str(),
        ]);
    }
    print!("{}", table.render());
}

fn print_shift_results(summary: &ShiftSummary, catalog: &[Task], variant: Variant) {
    println!();
    println!("{}", bold("Clock log"));
    print_clock_log(&summary.clock_log);

    if variant.has_task_tracking() {
        println!("{}", bold("Task times"));
        let mut table = Table::new(&["Task", "Category", "Tracked", "Events"]);
        for task in catalog {
            let seconds = summary.task_seconds.get(&task.id).copied().unwrap_or(0);
            let events = summary.task_logs.get(&task.id).map(Vec::len).unwrap_or(0);
            table.add_row(vec![
                task.name.clone(),
                task.category.code().to_string(),
                colorize_timer(&format_hms(seconds)),
                events.to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    messages::success(format!(
        "Total shift: {}",
        format_hms(summary.total_seconds)
    ));
}

fn print_allocation(plan: &AllocationPlan, catalog: &[Task]) {
    let variant = plan.variant();

    println!();
    println!("{}", bold("Allocation"));

    let mut table = if variant.has_manual_split() {
        Table::new(&["Task", "Category", "Tracked", "Manual", "Total"])
    } else if variant.has_attachments() {
        Table::new(&["Task", "Category", "Allocated", "Note"])
    } else {
        Table::new(&["Task", "Category", "Allocated"])
    };

    for (task_id, entry) in plan.entries_in_order() {
        let task = match find_task(catalog, task_id) {
            Some(t) => t,
            None => continue,
        };
        let mut row = vec![task.name.clone(), task.category.code().to_string()];
        if variant.has_manual_split() {
            row.push(format_hms(entry.tracked));
            row.push(format_hms(entry.manual));
            row.push(format_hms(entry.allocated()));
        } else {
            row.push(format_hms(entry.allocated()));
            if variant.has_attachments() {
                row.push(entry.note.clone().unwrap_or_default());
            }
        }
        table.add_row(row);
    }
    print!("{}", table.render());

    let totals = plan.totals();
    let untracked_label = if variant.has_manual_split() {
        "Manual"
    } else {
        "Untracked"
    };

    println!(
        "{} {} / {}",
        bold("Total allocated:"),
        format_hm(totals.allocated),
        format_hm(plan.goal_seconds())
    );
    println!("Tracked:   {}", secs2readable(totals.tracked, false));
    println!("{}: {}", untracked_label, secs2readable(totals.untracked, false));
    println!(
        "Remaining: {}{}{}",
        color_for_remaining(totals.remaining),
        secs2readable(totals.remaining.max(0), false),
        RESET
    );
}

fn run_confirmation(plan: &mut AllocationPlan, yes: bool) -> bool {
    match plan.confirm() {
        ConfirmOutcome::Submitted => true,
        ConfirmOutcome::Blocked => {
            let totals = plan.totals();
            messages::error(format!(
                "Overallocated by {}, cannot submit.",
                format_hm(-totals.remaining)
            ));
            false
        }
        ConfirmOutcome::NeedsConfirmation => {
            let totals = plan.totals();
            messages::warning(format!(
                "Your total shift time ({}) is less than the standard 8-hour shift. Submit anyway?",
                format_hm(totals.allocated)
            ));
            if yes {
                plan.proceed_under_allocation();
                true
            } else {
                plan.cancel_confirmation();
                messages::info("Submission cancelled (pass --yes to proceed).");
                false
            }
        }
    }
}

// -----------------------------
// Script parsing
// -----------------------------

fn parse_task_script(specs: &[String], catalog: &[Task]) -> AppResult<Vec<(u32, i64)>> {
    let mut script = Vec::new();
    for spec in specs {
        let (id, dur) = spec
            .split_once('=')
            .ok_or_else(|| AppError::InvalidTaskSpec(spec.clone()))?;
        let id: u32 = id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidTaskSpec(spec.clone()))?;
        if find_task(catalog, id).is_none() {
            return Err(AppError::UnknownTask(id));
        }
        script.push((id, parse_duration(dur)?));
    }
    Ok(script)
}

fn apply_notes(plan: &mut AllocationPlan, specs: &[String], catalog: &[Task]) -> AppResult<()> {
    for spec in specs {
        let (id, text) = spec
            .split_once('=')
            .ok_or_else(|| AppError::InvalidAllocation(spec.clone()))?;
        let id: u32 = id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidAllocation(spec.clone()))?;
        if find_task(catalog, id).is_none() {
            return Err(AppError::UnknownTask(id));
        }
        if !plan.set_note(id, text.to_string()) {
            messages::warning("Notes are only available in the attachments variant (v3).");
        }
    }
    Ok(())
}

fn apply_edits(plan: &mut AllocationPlan, specs: &[String], catalog: &[Task]) -> AppResult<()> {
    for spec in specs {
        let (target, dur) = spec
            .split_once('=')
            .ok_or_else(|| AppError::InvalidAllocation(spec.clone()))?;

        let (id_part, field) = match target.split_once('.') {
            Some((id, "tracked")) => (id, AllocationField::Tracked),
            Some((id, "manual")) => (id, AllocationField::Manual),
            Some(_) => return Err(AppError::InvalidAllocation(spec.clone())),
            None => (target, AllocationField::Tracked),
        };

        let id: u32 = id_part
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidAllocation(spec.clone()))?;
        if find_task(catalog, id).is_none() {
            return Err(AppError::UnknownTask(id));
        }

        let seconds = parse_duration(dur)?;
        match plan.set_allocation(id, field, seconds) {
            Some(applied) if applied.clamped => {
                messages::warning(ALLOCATION_LIMIT_NOTICE);
            }
            Some(_) => {}
            None => {
                messages::warning(
                    "Manual time is only available in the tracked/manual variants (v2, v4).",
                );
            }
        }
    }
    Ok(())
}

fn task_label(catalog: &[Task], id: u32) -> String {
    find_task(catalog, id)
        .map(|t| format!("{} ({})", t.name, t.id))
        .unwrap_or_else(|| format!("#{id}"))
}

use itertools::Itertools;
use log::{debug, warn};
use time::{DayOffset, Interval, Time};

use model::base_types::{BusId, ShiftId};
use model::buses::{Bus, MAX_BREAKS};
use model::diagnostics::Diagnostics;
use model::error::ConfigError;
use model::regimes::FleetScope;
use model::shifts::ShiftRecord;

use super::ResourceContext;

/// one bus per (active shift, capacity) with the real shift window and breaks, followed by the
/// continuations of the previous day's shifts that run past midnight.
pub(super) fn generate(
    context: &ResourceContext,
    scope: FleetScope,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Bus>, ConfigError> {
    let capacities = context.capacities(scope);
    let mut buses = Vec::new();

    for shift in context.active_shifts(scope, context.weekday())? {
        if let Some((window, breaks)) = same_day_part(shift, diagnostics) {
            buses.extend(capacities.iter().map(|&capacity| {
                Bus::new(
                    BusId::Shift {
                        depot: shift.depot_id,
                        shift: shift.shift_id.clone(),
                        capacity,
                    },
                    capacity,
                    window,
                    breaks,
                    context.depot.id(),
                )
            }));
        }
    }
    let same_day = buses.len();

    let buffer = context.config.buffer();
    for shift in context.active_shifts(scope, context.weekday().pred())? {
        if let Some((window, breaks)) = continuation_part(shift, buffer, diagnostics) {
            buses.extend(capacities.iter().map(|&capacity| {
                Bus::new(
                    BusId::Continuation {
                        depot: shift.depot_id,
                        shift: shift.shift_id.clone(),
                        capacity,
                    },
                    capacity,
                    window,
                    breaks,
                    context.depot.id(),
                )
            }));
        }
    }

    debug!(
        "depot {} on {}: {} buses of the day, {} continuations",
        context.depot.name(),
        context.date,
        same_day,
        buses.len() - same_day
    );
    Ok(buses)
}

/// the shift on the timeline of its own day.
fn same_day_part(
    shift: &ShiftRecord,
    diagnostics: &mut Diagnostics,
) -> Option<(Interval, [Interval; MAX_BREAKS])> {
    let timeline = shift.timeline(diagnostics);
    let window = timeline.window();
    if window.start() >= window.end() {
        warn!(
            "shift {}: empty window {}, skipped",
            shift.shift_id, window
        );
        diagnostics.degenerate_shifts += 1;
        return None;
    }
    let breaks = fit_breaks(
        &shift.shift_id,
        timeline.break_windows(),
        window,
        window.start(),
        diagnostics,
    );
    Some((window, breaks))
}

/// the part after midnight of a shift declared on the previous day, available from the buffer.
/// `None` if the shift ends before midnight.
fn continuation_part(
    shift: &ShiftRecord,
    buffer: Time,
    diagnostics: &mut Diagnostics,
) -> Option<(Interval, [Interval; MAX_BREAKS])> {
    let timeline = shift
        .timeline(diagnostics)
        .anchored_to(DayOffset::PREVIOUS_DAY);
    if !timeline.reaches_anchor_day() {
        return None;
    }
    let window = Interval::new(buffer, timeline.end().time());
    if window.start() >= window.end() {
        warn!(
            "shift {}: continuation {} is empty, skipped",
            shift.shift_id, window
        );
        diagnostics.degenerate_shifts += 1;
        return None;
    }
    let clipped = timeline
        .break_windows()
        .iter()
        .map(|b| {
            b.intersection(&window)
                .unwrap_or(Interval::zero_length_at(buffer))
        })
        .collect_vec();
    let breaks = fit_breaks(&shift.shift_id, clipped, window, buffer, diagnostics);
    Some((window, breaks))
}

/// places up to [`MAX_BREAKS`] breaks into the bus slots. Slots without a usable break get a
/// zero-length break at `no_break_at`. A zero-length break inside the window keeps its position.
/// A break that is inverted or leaves the window, or that overlaps an earlier break, is dropped.
fn fit_breaks(
    shift_id: &ShiftId,
    breaks: Vec<Interval>,
    window: Interval,
    no_break_at: Time,
    diagnostics: &mut Diagnostics,
) -> [Interval; MAX_BREAKS] {
    let mut fitted = [Interval::zero_length_at(no_break_at); MAX_BREAKS];
    let mut kept: Vec<Interval> = Vec::new();
    for (slot, candidate) in breaks.into_iter().take(MAX_BREAKS).enumerate() {
        if candidate.is_degenerate() {
            if window.contains(&candidate) {
                fitted[slot] = candidate;
            }
            continue;
        }
        if candidate.is_inverted() || !window.contains(&candidate) {
            warn!(
                "shift {}: break {} lies outside the shift {}, treated as no break",
                shift_id, candidate, window
            );
            diagnostics.breaks_outside_shift += 1;
            continue;
        }
        if kept.iter().any(|k| k.overlaps(&candidate)) {
            warn!(
                "shift {}: break {} overlaps an earlier break, treated as no break",
                shift_id, candidate
            );
            diagnostics.overlapping_breaks += 1;
            continue;
        }
        fitted[slot] = candidate;
        kept.push(candidate);
    }
    fitted
}

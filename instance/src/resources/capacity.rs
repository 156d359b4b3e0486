use itertools::iproduct;
use log::debug;
use time::Interval;

use model::base_types::BusId;
use model::buses::Bus;
use model::error::ConfigError;
use model::regimes::FleetScope;

use super::ResourceContext;

/// one bus per (active shift, capacity), ignoring the shift times: every bus is available from
/// the buffer until the horizon.
pub(super) fn generate(
    context: &ResourceContext,
    scope: FleetScope,
) -> Result<Vec<Bus>, ConfigError> {
    let shifts = context.active_shifts(scope, context.weekday())?;
    let capacities = context.capacities(scope);
    let buffer = context.config.buffer();
    let window = Interval::new(buffer, context.horizon.latest_return());

    let buses: Vec<Bus> = iproduct!(shifts.iter(), capacities.iter())
        .map(|(shift, &capacity)| {
            Bus::without_breaks(
                BusId::Shift {
                    depot: shift.depot_id,
                    shift: shift.shift_id.clone(),
                    capacity,
                },
                capacity,
                window,
                buffer,
                context.depot.id(),
            )
        })
        .collect();
    debug!(
        "depot {} on {}: {} shifts x {} capacities",
        context.depot.name(),
        context.date,
        shifts.len(),
        capacities.len()
    );
    Ok(buses)
}

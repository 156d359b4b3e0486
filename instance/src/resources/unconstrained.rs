use model::base_types::{BusId, Idx, PassengerCount};
use model::buses::Bus;
use time::Interval;

use super::ResourceContext;

/// one bus per route trip (at least one), each able to carry every passenger, available from the
/// buffer until the horizon.
pub(super) fn generate(context: &ResourceContext) -> Vec<Bus> {
    let count = context.routes.len().max(1);
    let capacity = context
        .config
        .unconstrained_capacity
        .unwrap_or(count as PassengerCount);
    let buffer = context.config.buffer();
    let window = Interval::new(buffer, context.horizon.latest_return());

    (0..count)
        .map(|i| {
            Bus::without_breaks(
                BusId::fleet_from(i as Idx),
                capacity,
                window,
                buffer,
                context.depot.id(),
            )
        })
        .collect()
}

use chrono::NaiveDate;
use time::{Interval, Time};

use model::base_types::{BusId, DepotId, ShiftId};
use model::buses::Bus;
use model::config::Config;
use model::diagnostics::Diagnostics;
use model::error::ConfigError;
use model::regimes::{FleetScope, OperatingRegime};
use model::routes::Route;
use model::shifts::ShiftRecord;
use model::vehicles::VehicleRecord;

use super::{generate_resources, ResourceContext};
use crate::horizon::{compute_horizon, Horizon};
use crate::test_utilities::{depot_a, depot_a_day, monday, route, shift, tuesday, vehicle};

fn minutes(start: i32, end: i32) -> Interval {
    Interval::new(Time::from_minutes(start), Time::from_minutes(end))
}

fn generate(
    regime: OperatingRegime,
    date: NaiveDate,
    routes: &[&Route],
    shifts: &[ShiftRecord],
    vehicles: &[VehicleRecord],
    config: &Config,
) -> (Vec<Bus>, Diagnostics) {
    let depot = depot_a();
    let context = ResourceContext {
        depot: &depot,
        date,
        routes,
        horizon: Horizon::new(Time::from_minutes(1500), 1),
        shifts,
        vehicles,
        config,
    };
    let mut diagnostics = Diagnostics::default();
    let buses = generate_resources(regime, &context, &mut diagnostics).unwrap();
    (buses, diagnostics)
}

fn fleet() -> (Vec<ShiftRecord>, Vec<VehicleRecord>) {
    let shifts = vec![
        shift("S2", 1, "22:00", "02:00", &[("23:30", "00:30")], &["monday", "sunday"]),
        shift("S1", 1, "06:00", "14:00", &[("10:00", "10:30")], &["monday", "tuesday"]),
        shift("S3", 2, "05:00", "13:00", &[], &["monday"]),
    ];
    let vehicles = vec![vehicle(1, 60), vehicle(1, 40), vehicle(2, 80), vehicle(1, 40)];
    (shifts, vehicles)
}

fn ids(buses: &[Bus]) -> Vec<String> {
    buses.iter().map(|b| b.id().to_string()).collect()
}

////////////////////////////////////////////////////////////////////
////////////////////////// unconstrained ///////////////////////////
////////////////////////////////////////////////////////////////////

#[test]
fn depot_a_unconstrained_single_bus() {
    // ARRANGE
    let depot = depot_a();
    let config = Config::default();
    let (routes, travel_times) = depot_a_day();
    let mut diagnostics = Diagnostics::default();
    let horizon = compute_horizon(&depot, monday(), &routes, &travel_times, &mut diagnostics);
    let day_routes = routes.of_depot_on(depot.id(), chrono::Weekday::Mon);
    let context = ResourceContext {
        depot: &depot,
        date: monday(),
        routes: &day_routes,
        horizon,
        shifts: &[],
        vehicles: &[],
        config: &config,
    };

    // ACT
    let buses =
        generate_resources(OperatingRegime::Unconstrained, &context, &mut diagnostics).unwrap();

    // ASSERT
    assert_eq!(horizon.latest_return(), Time::from_minutes(32));
    assert_eq!(buses.len(), 1);
    let bus = &buses[0];
    assert_eq!(bus.capacity(), 1);
    assert_eq!(bus.window(), minutes(-120, 32));
    assert_eq!(bus.real_breaks().count(), 0);
    assert_eq!(bus.breaks()[0], Interval::zero_length_at(Time::from_minutes(-120)));
    assert!(bus.is_consistent());
    assert_eq!(bus.depot_id(), DepotId(1));
}

#[test]
fn unconstrained_one_bus_per_trip() {
    let r1 = route("L1", "T1", 1, &[(1, 360), (2, 370)]);
    let r2 = route("L1", "T2", 2, &[(2, 400), (1, 410)]);
    let r3 = route("L2", "T1", 1, &[(3, 500)]);
    let routes = [&r1, &r2, &r3];

    let (buses, _) = generate(
        OperatingRegime::Unconstrained,
        monday(),
        &routes,
        &[],
        &[],
        &Config::default(),
    );
    assert_eq!(ids(&buses), vec!["bus0", "bus1", "bus2"]);
    assert!(buses.iter().all(|b| b.capacity() == 3));

    let config = Config {
        unconstrained_capacity: Some(500),
        ..Config::default()
    };
    let (buses, _) = generate(
        OperatingRegime::Unconstrained,
        monday(),
        &routes,
        &[],
        &[],
        &config,
    );
    assert!(buses.iter().all(|b| b.capacity() == 500));
}

#[test]
fn unconstrained_without_routes_keeps_one_bus() {
    let (buses, _) = generate(
        OperatingRegime::Unconstrained,
        monday(),
        &[],
        &[],
        &[],
        &Config::default(),
    );
    assert_eq!(buses.len(), 1);
    assert_eq!(buses[0].capacity(), 1);
}

////////////////////////////////////////////////////////////////////
///////////////////////////// capacity /////////////////////////////
////////////////////////////////////////////////////////////////////

#[test]
fn capacity_regime_whole_fleet() {
    let (shifts, vehicles) = fleet();
    let (buses, _) = generate(
        OperatingRegime::Capacity,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );

    assert_eq!(
        ids(&buses),
        vec![
            "d1_S1_cap40",
            "d1_S1_cap60",
            "d1_S1_cap80",
            "d1_S2_cap40",
            "d1_S2_cap60",
            "d1_S2_cap80",
            "d2_S3_cap40",
            "d2_S3_cap60",
            "d2_S3_cap80",
        ]
    );
    for bus in buses.iter() {
        assert_eq!(bus.window(), minutes(-120, 1500));
        assert_eq!(bus.real_breaks().count(), 0);
        assert_eq!(bus.depot_id(), DepotId(1));
    }
}

#[test]
fn capacity_regime_depot_scope() {
    let (shifts, vehicles) = fleet();
    let config = Config {
        capacity_scope: FleetScope::Depot,
        ..Config::default()
    };
    let (buses, _) = generate(
        OperatingRegime::Capacity,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &config,
    );
    assert_eq!(
        ids(&buses),
        vec!["d1_S1_cap40", "d1_S1_cap60", "d1_S2_cap40", "d1_S2_cap60"]
    );
}

#[test]
fn empty_vehicle_pool_uses_fallback_capacity() {
    let (shifts, _) = fleet();

    let (buses, _) = generate(
        OperatingRegime::Capacity,
        monday(),
        &[],
        &shifts,
        &[],
        &Config::default(),
    );
    assert!(buses.is_empty());

    let config = Config {
        fallback_capacity: Some(50),
        ..Config::default()
    };
    let (buses, _) = generate(
        OperatingRegime::Capacity,
        monday(),
        &[],
        &shifts,
        &[],
        &config,
    );
    assert_eq!(buses.len(), 3);
    assert!(buses.iter().all(|b| b.capacity() == 50));
}

////////////////////////////////////////////////////////////////////
////////////////////////////// breaks //////////////////////////////
////////////////////////////////////////////////////////////////////

#[test]
fn breaks_regime_real_shift_times() {
    let (shifts, vehicles) = fleet();
    let (buses, diagnostics) = generate(
        OperatingRegime::CapacityBreaks,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );

    // 3 monday shifts x 3 capacities, then S2 of sunday running into monday
    assert_eq!(buses.len(), 12);
    let day_shift = &buses[0];
    assert_eq!(day_shift.id().to_string(), "d1_S1_cap40");
    assert_eq!(day_shift.window(), minutes(360, 840));
    assert_eq!(day_shift.breaks()[0], minutes(600, 630));
    assert_eq!(
        day_shift.breaks()[1],
        Interval::zero_length_at(Time::from_minutes(360))
    );

    let night_shift = &buses[3];
    assert_eq!(night_shift.id().to_string(), "d1_S2_cap40");
    assert_eq!(night_shift.window(), minutes(1320, 1560));
    assert_eq!(night_shift.breaks()[0], minutes(1410, 1470));

    let no_breaks = &buses[6];
    assert_eq!(no_breaks.id().to_string(), "d2_S3_cap40");
    assert_eq!(no_breaks.real_breaks().count(), 0);

    assert!(buses[..9].iter().all(|b| !b.id().is_continuation()));
    assert_eq!(
        ids(&buses[9..]),
        vec!["d1_S2_cap40_prev", "d1_S2_cap60_prev", "d1_S2_cap80_prev"]
    );
    assert_eq!(diagnostics, Diagnostics::default());
}

#[test]
fn continuation_of_a_night_shift() {
    // 22:00-02:00 declared on monday, planning tuesday
    let shifts = vec![shift(
        "N1",
        1,
        "22:00",
        "02:00",
        &[("23:30", "00:30")],
        &["monday"],
    )];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, _) = generate(
        OperatingRegime::CapacityBreaks,
        tuesday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );

    assert_eq!(buses.len(), 1);
    let continuation = &buses[0];
    assert_eq!(
        continuation.id(),
        &BusId::Continuation {
            depot: DepotId(1),
            shift: ShiftId::from("N1"),
            capacity: 40,
        }
    );
    assert_eq!(continuation.window(), minutes(-120, 120));
    assert_eq!(continuation.breaks()[0], minutes(-30, 30));
    assert_eq!(
        continuation.breaks()[1],
        Interval::zero_length_at(Time::from_minutes(-120))
    );
    assert!(continuation.is_consistent());
}

#[test]
fn continuation_ends_at_clock_time_of_the_shift_end() {
    // 23:30-01:00 normalizes to [1410, 1500]; the next day sees [buffer, 60]
    let shifts = vec![shift("N2", 1, "23:30", "01:00", &[], &["monday"])];
    let vehicles = vec![vehicle(1, 40)];
    let config = Config {
        pre_midnight_buffer: Time::from_minutes(-90),
        ..Config::default()
    };
    let (buses, _) = generate(
        OperatingRegime::CapacityBreaksDepotLocal,
        tuesday(),
        &[],
        &shifts,
        &vehicles,
        &config,
    );

    assert_eq!(buses.len(), 1);
    assert_eq!(buses[0].window(), minutes(-90, 60));
    assert!(buses[0].id().is_continuation());
}

#[test]
fn shifts_ending_before_midnight_have_no_continuation() {
    let shifts = vec![shift("S1", 1, "06:00", "14:00", &[], &["monday"])];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, _) = generate(
        OperatingRegime::CapacityBreaks,
        tuesday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );
    assert!(buses.is_empty());
}

#[test]
fn continuation_breaks_before_the_buffer_collapse() {
    // break 21:00-21:30 lies entirely before the buffer of the next day
    let shifts = vec![shift(
        "N3",
        1,
        "20:00",
        "03:00",
        &[("21:00", "21:30"), ("01:00", "01:30")],
        &["monday"],
    )];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, diagnostics) = generate(
        OperatingRegime::CapacityBreaks,
        tuesday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );

    let continuation = &buses[0];
    assert_eq!(continuation.window(), minutes(-120, 180));
    assert_eq!(
        continuation.breaks()[0],
        Interval::zero_length_at(Time::from_minutes(-120))
    );
    assert_eq!(continuation.breaks()[1], minutes(60, 90));
    assert_eq!(diagnostics.breaks_outside_shift, 0);
}

#[test]
fn continuation_break_touching_the_shift_end_keeps_its_point() {
    // 02:00-02:30 starts at the shift end; only the point 02:00 is left of it
    let shifts = vec![shift(
        "N4",
        1,
        "20:00",
        "02:00",
        &[("02:00", "02:30")],
        &["monday"],
    )];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, diagnostics) = generate(
        OperatingRegime::CapacityBreaks,
        tuesday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );

    let continuation = &buses[0];
    assert_eq!(continuation.window(), minutes(-120, 120));
    assert_eq!(
        continuation.breaks()[0],
        Interval::zero_length_at(Time::from_minutes(120))
    );
    assert_eq!(continuation.real_breaks().count(), 0);
    assert!(continuation.is_consistent());
    assert_eq!(diagnostics.breaks_outside_shift, 0);
}

#[test]
fn breaks_outside_the_shift_are_dropped() {
    // 05:00 is earlier than the start and moves to the next day, after the shift end
    let shifts = vec![shift(
        "S1",
        1,
        "06:00",
        "14:00",
        &[("05:00", "05:30"), ("10:00", "10:30")],
        &["monday"],
    )];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, diagnostics) = generate(
        OperatingRegime::CapacityBreaks,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );

    let bus = &buses[0];
    assert_eq!(bus.breaks()[0], Interval::zero_length_at(Time::from_minutes(360)));
    assert_eq!(bus.breaks()[1], minutes(600, 630));
    assert!(bus.is_consistent());
    assert_eq!(diagnostics.breaks_outside_shift, 1);
}

#[test]
fn overlapping_breaks_keep_the_first() {
    let shifts = vec![shift(
        "S1",
        1,
        "06:00",
        "14:00",
        &[("10:00", "10:30"), ("10:15", "11:00")],
        &["monday"],
    )];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, diagnostics) = generate(
        OperatingRegime::CapacityBreaks,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );
    assert_eq!(buses[0].real_breaks().count(), 1);
    assert!(buses[0].is_consistent());
    assert_eq!(diagnostics.overlapping_breaks, 1);
}

#[test]
fn degenerate_shifts_are_skipped() {
    let shifts = vec![
        shift("S0", 1, "08:00", "08:00", &[], &["monday"]),
        shift("S1", 1, "06:00", "14:00", &[], &["monday"]),
    ];
    let vehicles = vec![vehicle(1, 40)];
    let (buses, diagnostics) = generate(
        OperatingRegime::CapacityBreaks,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );
    assert_eq!(ids(&buses), vec!["d1_S1_cap40"]);
    assert_eq!(diagnostics.degenerate_shifts, 1);
}

#[test]
fn depot_local_breaks_ignore_other_depots() {
    let (shifts, vehicles) = fleet();
    let (buses, _) = generate(
        OperatingRegime::CapacityBreaksDepotLocal,
        monday(),
        &[],
        &shifts,
        &vehicles,
        &Config::default(),
    );
    assert_eq!(
        ids(&buses),
        vec![
            "d1_S1_cap40",
            "d1_S1_cap60",
            "d1_S2_cap40",
            "d1_S2_cap60",
            "d1_S2_cap40_prev",
            "d1_S2_cap60_prev",
        ]
    );
}

#[test]
fn all_break_regime_buses_are_consistent() {
    let (mut shifts, vehicles) = fleet();
    shifts.push(shift(
        "S4",
        1,
        "13:00",
        "25:30",
        &[("18:00", "18:45"), ("00:15", "00:45")],
        &["sunday", "monday"],
    ));
    shifts.push(shift(
        "S5",
        1,
        "19:00",
        "04:00",
        &[("23:00", "23:40"), ("02:00", "02:20")],
        &["sunday", "monday"],
    ));

    for regime in [
        OperatingRegime::CapacityBreaks,
        OperatingRegime::CapacityBreaksDepotLocal,
    ] {
        for date in [monday(), tuesday()] {
            let (buses, _) =
                generate(regime, date, &[], &shifts, &vehicles, &Config::default());
            assert!(!buses.is_empty());
            for bus in buses.iter() {
                assert!(bus.is_consistent(), "{}", bus);
                for b in bus.breaks() {
                    assert!(bus.window().contains(b), "{}", bus);
                }
            }
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let (shifts, vehicles) = fleet();
    for regime in OperatingRegime::ALL {
        let first = generate(regime, monday(), &[], &shifts, &vehicles, &Config::default());
        let second = generate(regime, monday(), &[], &shifts, &vehicles, &Config::default());
        assert_eq!(first, second);
    }
}

#[test]
fn missing_weekday_column_is_a_config_error() {
    let mut record = shift("S1", 1, "06:00", "14:00", &[], &["monday"]);
    record.days.remove("tuesday");
    let depot = depot_a();
    let config = Config::default();
    let context = ResourceContext {
        depot: &depot,
        date: tuesday(),
        routes: &[],
        horizon: Horizon::new(Time::from_minutes(600), 1),
        shifts: std::slice::from_ref(&record),
        vehicles: &[],
        config: &config,
    };
    let result = generate_resources(
        OperatingRegime::CapacityBreaks,
        &context,
        &mut Diagnostics::default(),
    );
    assert!(matches!(
        result,
        Err(ConfigError::MissingWeekdayColumn { .. })
    ));
}

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        carrier::{Carrier, PerCarrier},
        comparison::Comparison,
        counters::OperationalCounters,
        emissions::RidepoolingEmissions,
        factors::{EmissionFactors, ReferenceSource},
        fleet::FleetTotals,
        metrics::PerformanceMetrics,
        occupancy::{BusProjection, BusScenario, ReferenceOccupancy},
        vehicle::Fleet,
    },
    presets::{SystemPreset, VehiclePreset},
    quantity::consumption::ConsumptionRate,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn consumption_rate_cells(consumption: &PerCarrier<ConsumptionRate>) -> Vec<Cell> {
    consumption
        .iter()
        .map(|(carrier, rate)| {
            let cell = Cell::new(format!("{rate} {}/100 km", carrier.unit()))
                .set_alignment(CellAlignment::Right);
            if rate.is_positive() {
                cell.fg(carrier.color())
            } else {
                cell.add_attribute(Attribute::Dim)
            }
        })
        .collect()
}

pub fn build_fleet_table(fleet: &Fleet) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#", "Type", "Gasoline", "Diesel", "Electricity", "Empty", "Occupied", "Total",
    ]);
    for (i, vehicle) in fleet.iter().enumerate() {
        let mut row = vec![
            Cell::new(i + 1).add_attribute(Attribute::Dim),
            Cell::new(&vehicle.vehicle_type).add_attribute(Attribute::Bold),
        ];
        row.extend(consumption_rate_cells(&vehicle.consumption));
        row.extend([
            Cell::new(vehicle.empty_distance).set_alignment(CellAlignment::Right).fg(Color::Red),
            Cell::new(vehicle.occupied_distance)
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            Cell::new(vehicle.distance()).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(row);
    }
    table
}

pub fn build_counters_table(counters: &OperationalCounters) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Period", "Days", "Bookings", "Passengers"]);
    table.add_row(vec![
        Cell::new(format!("{} – {}", counters.period.start, counters.period.end)),
        Cell::new(counters.period.n_days()).set_alignment(CellAlignment::Right),
        Cell::new(counters.completed_bookings).set_alignment(CellAlignment::Right),
        Cell::new(counters.transported_passengers).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_totals_table(totals: &FleetTotals) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Fleet total", "Value"]);
    table.add_row(vec![
        Cell::new("Empty distance"),
        Cell::new(totals.empty_distance).set_alignment(CellAlignment::Right).fg(Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Occupied distance"),
        Cell::new(totals.occupied_distance).set_alignment(CellAlignment::Right).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Total distance").add_attribute(Attribute::Bold),
        Cell::new(totals.total_distance).set_alignment(CellAlignment::Right),
    ]);
    for (carrier, consumption) in totals.consumption.iter() {
        table.add_row(vec![
            Cell::new(format!("{carrier} consumption")).fg(carrier.color()),
            Cell::new(format!("{consumption} {}", carrier.unit()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_metrics_table(metrics: &PerformanceMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Indicator", "Value"]);
    let rows = [
        ("Average trip distance", metrics.average_trip_distance.to_string()),
        ("Average occupied trip distance", metrics.average_occupied_trip_distance.to_string()),
        ("Passenger-kilometres", metrics.passenger_distance.to_string()),
        ("Empty distance share", metrics.empty_distance_share.to_string()),
        ("Bundling ratio", format!("{:.2}", metrics.bundling_ratio)),
        ("Occupancy ratio", format!("{:.2}", metrics.occupancy_ratio)),
    ];
    for (indicator, value) in rows {
        table.add_row(vec![
            Cell::new(indicator),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_factors_table(factors: &EmissionFactors) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Carrier", "Source", "Factor", "Applied"]);
    for carrier in Carrier::all() {
        let unit = format!("g/{}", carrier.unit());
        let grid = factors.grid[carrier];
        let effective = factors.effective[carrier];
        table.add_row(vec![
            Cell::new(carrier).fg(carrier.color()),
            Cell::new(factors.selections[carrier]),
            Cell::new(format!("{grid} {unit}")).set_alignment(CellAlignment::Right),
            Cell::new(format!("{effective} {unit}"))
                .set_alignment(CellAlignment::Right)
                .fg(if effective < grid { Color::Green } else { Color::Reset }),
        ]);
    }
    if factors.renewable.share.is_positive() {
        table.add_row(vec![
            Cell::new("Renewable share").add_attribute(Attribute::Dim),
            Cell::new(factors.renewable.share),
            Cell::new(format!("{} g/kWh", factors.renewable.factor))
                .set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
    }
    table
}

pub fn build_emissions_table(emissions: &RidepoolingEmissions) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Carrier", "Emissions"]);
    for (carrier, mass) in emissions.per_carrier.iter() {
        table.add_row(vec![
            Cell::new(carrier).fg(carrier.color()),
            Cell::new(mass).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(emissions.total)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Per passenger-kilometre").add_attribute(Attribute::Bold),
        Cell::new(emissions.per_passenger_km)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_bus_table(bus: &BusProjection) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Bus", "Value"]);
    let mut add_row = |name: &str, value: String| {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    };
    if let Some(space_distance) = bus.space_distance {
        add_row("Space-kilometres", space_distance.to_string());
    }
    if let Some(person_km) = bus.person_km() {
        add_row("Person-kilometres", person_km.to_string());
    }
    add_row("Reference occupancy", bus.reference_occupancy.to_string());
    add_row("Reference emissions", bus.reference_co2.to_string());
    add_row("Assumed occupancy", bus.assumed_occupancy.to_string());
    if let Some(difference) = bus.percent_difference() {
        add_row("Occupancy change", difference.to_string());
    }
    table.add_row(vec![
        Cell::new("Projected emissions").add_attribute(Attribute::Bold),
        Cell::new(bus.co2_per_pkm)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_comparison_table(comparison: &Comparison) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Mode", "Emissions"]);
    for point in comparison.series.iter() {
        let cell = Cell::new(point.co2_per_pkm).set_alignment(CellAlignment::Right);
        let cell = if point.label == comparison.ridepooling.label {
            cell.fg(if comparison.difference().is_positive() { Color::Red } else { Color::Green })
                .add_attribute(Attribute::Bold)
        } else {
            cell
        };
        table.add_row(vec![Cell::new(&point.label), cell]);
    }
    table
}

pub fn build_system_presets_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Ridepooling system", "Bookings", "Passengers", "Vehicles"]);
    for preset in SystemPreset::all() {
        table.add_row(vec![
            Cell::new(preset).add_attribute(Attribute::Bold),
            Cell::new(preset.completed_bookings()).set_alignment(CellAlignment::Right),
            Cell::new(preset.transported_passengers()).set_alignment(CellAlignment::Right),
            Cell::new(preset.fleet().len()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_vehicle_presets_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Vehicle type", "Gasoline", "Diesel", "Electricity"]);
    for preset in VehiclePreset::all() {
        let mut row = vec![Cell::new(preset).add_attribute(Attribute::Bold)];
        row.extend(consumption_rate_cells(&preset.consumption()));
        table.add_row(row);
    }
    table
}

pub fn build_reference_sources_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Source", "Carrier", "Factor"]);
    for source in [
        ReferenceSource::Helmholtz,
        ReferenceSource::Co2Online,
        ReferenceSource::UbaLifeCycle,
        ReferenceSource::UbaGridMix,
    ] {
        for carrier in Carrier::all() {
            if let Some(factor) = source.factor(carrier) {
                table.add_row(vec![
                    Cell::new(source),
                    Cell::new(carrier).fg(carrier.color()),
                    Cell::new(format!("{factor} g/{}", carrier.unit()))
                        .set_alignment(CellAlignment::Right),
                ]);
            }
        }
    }
    table
}

pub fn build_bus_reference_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Bus reference", "Value"]);
    let derived = ReferenceOccupancy::default();
    let rows = [
        ("Emissions", BusScenario::LITERATURE_CO2.to_string()),
        ("Average occupancy", ReferenceOccupancy::LITERATURE.to_string()),
        ("Person-kilometres, millions", ReferenceOccupancy::VDV_PERSON_KM.to_string()),
        ("Space-kilometres, millions", ReferenceOccupancy::VDV_SPACE_KM.to_string()),
        (
            "Derived occupancy",
            derived
                .occupancy()
                .map_or_else(|error| error.to_string(), |occupancy| occupancy.to_string()),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    table
}

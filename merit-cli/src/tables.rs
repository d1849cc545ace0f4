use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use merit_quantities::power::Megawatts;

use crate::core::{allocation::Allocation, cost_model::CostModel, request::LoadRequest};

pub fn build_allocation_table(
    request: &LoadRequest,
    allocation: &Allocation,
    cost_model: &CostModel,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Unit", "Type", "Marginal", "Min", "Max", "Output", "Cost"]);

    for (unit, assignment) in request.units.iter().zip(&allocation.assignments) {
        let marginal_cost = cost_model.marginal_cost(unit, &request.fuel_prices).ok();
        let output = assignment.output.round_to_tenths();
        table.add_row(vec![
            Cell::new(&unit.name),
            Cell::new(unit.category).add_attribute(Attribute::Dim),
            marginal_cost.map_or_else(|| Cell::new("n/a"), Cell::new).set_alignment(CellAlignment::Right),
            Cell::new(unit.min_output).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(unit.max_output).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(output).set_alignment(CellAlignment::Right).fg(if output <= Megawatts::ZERO {
                Color::DarkGrey
            } else if output >= unit.max_output {
                Color::Green
            } else {
                Color::DarkYellow
            }),
            marginal_cost
                .map_or_else(|| Cell::new("n/a"), |marginal_cost| Cell::new(assignment.output * marginal_cost))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(request.load).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        Cell::new(allocation.total_output().round_to_tenths())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(allocation.total_cost).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

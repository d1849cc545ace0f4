use crate::{
    core::{
        allocation::Allocation,
        cost_model::CostModel,
        error::AllocationError,
        planner::Planner,
        request::LoadRequest,
    },
    prelude::*,
};

/// Run the planner and report its decisions.
#[instrument(skip_all, fields(load = %request.load, n_units = request.units.len()))]
pub fn plan(request: &LoadRequest, cost_model: CostModel) -> Result<Allocation, AllocationError> {
    let result = Planner::builder().request(request).cost_model(cost_model).build().allocate();
    match &result {
        Ok(allocation) => {
            for (unit, kind) in allocation.events() {
                debug!(unit, %kind);
            }
            info!(
                scenario = ?allocation.scenario,
                total_output = %allocation.total_output(),
                total_cost = %allocation.total_cost,
                "allocated",
            );
        }
        Err(error) if error.is_internal() => {
            error!("allocation failed: {error}");
        }
        Err(error) => {
            warn!("allocation failed: {error}");
        }
    }
    result
}

use log::debug;

use crate::domain::adapter::SolverAdapter;
use crate::domain::error::Result;
use crate::domain::model::Model;
use crate::domain::pool::extract_solutions;
use crate::domain::progress::Progress;
use crate::domain::solver::Solver;
use crate::domain::status::{gate, SolveStatus};
use crate::domain::validate::pair_parameters;
use crate::models::{ModelDescription, SolveOutcome, SolveRequest, SolveResult};

/// Solve a model and read up to `number_solutions` solutions from the pool.
///
/// Input problems are reported before any solver call. A non-optimal solve is not an error:
/// it comes back as [`SolveOutcome::Stopped`] carrying only the status.
pub fn solve(
    solver: &dyn Solver,
    description: ModelDescription,
    params: &[(String, String)],
    number_solutions: usize,
    verbose: bool,
) -> Result<SolveOutcome> {
    let progress = Progress::new(verbose);
    progress.phase("Initialization");

    progress.phase("Preliminary processing");
    progress.step("loading data");
    let model = Model::try_from(description)?;

    progress.step("storing helper vars");
    debug!(
        "Model '{}': {} columns, {} rows, {} nonzeros",
        model.name,
        model.ncol(),
        model.nrow(),
        model.a_vals.len()
    );

    progress.step("initializing solver session");
    let mut adapter = SolverAdapter::open(solver)?;
    adapter.build(&model, params, &progress)?;

    progress.phase("Main processing");
    let raw_status = adapter.optimize()?;
    if let Err(exit) = gate(raw_status) {
        debug!("Stopping before extraction: {}", exit);
        return Ok(SolveOutcome::Stopped { status: exit });
    }

    progress.phase("Exports");
    progress.step("extracting solutions");
    let pool = extract_solutions(adapter.session_mut(), number_solutions)?;
    let status = SolveStatus::from_code(adapter.session().status()?);
    let statistics = adapter.session().statistics()?;

    progress.step("releasing solver session");
    drop(adapter);

    progress.step("returning results");
    Ok(SolveOutcome::Solved(SolveResult {
        status,
        runtime: statistics.runtime,
        itercount: statistics.itercount,
        baritercount: statistics.baritercount,
        nodecount: statistics.nodecount,
        objval: pool.objval,
        x: pool.x,
    }))
}

/// Solve a request as received over the API
pub fn solve_request(solver: &dyn Solver, request: SolveRequest) -> Result<SolveOutcome> {
    let params = pair_parameters(&request.param_names, &request.param_vals)?;
    solve(
        solver,
        request.model,
        &params,
        request.number_solutions,
        request.verbose,
    )
}

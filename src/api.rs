use actix_web::{web, HttpResponse, Responder};
use log::{error, warn};

use crate::domain::solve::solve_request;
use crate::domain::solver_factory::{create_solver, SolverType};
use crate::models::{ApiError, SolveRequest};

/// Shared, read-only server state
#[derive(Debug, Clone)]
pub struct AppState {
    pub default_solver: SolverType,
}

fn error_response(mut response: actix_web::HttpResponseBuilder, message: String) -> HttpResponse {
    response.json(ApiError { error: message })
}

/// POST /solve
pub async fn solve(state: web::Data<AppState>, req: web::Json<SolveRequest>) -> HttpResponse {
    let request = req.into_inner();

    let solver_type = match request.solver.as_deref() {
        Some(name) => match SolverType::from_str(name) {
            Some(solver_type) => solver_type,
            None => {
                return error_response(
                    HttpResponse::BadRequest(),
                    format!("Unknown solver '{}'", name),
                )
            }
        },
        None => state.default_solver,
    };

    // The solve blocks until the solver returns, so keep it off the async workers
    let result = web::block(move || {
        let solver = create_solver(solver_type);
        solve_request(solver.as_ref(), request)
    })
    .await;

    match result {
        Ok(Ok(outcome)) => HttpResponse::Ok().json(outcome),
        Ok(Err(err)) if err.is_input_error() => {
            warn!("Rejected solve request: {}", err);
            error_response(HttpResponse::BadRequest(), err.to_string())
        }
        Ok(Err(err)) => {
            error!("Solve failed: {}", err);
            error_response(HttpResponse::InternalServerError(), err.to_string())
        }
        Err(err) => {
            error!("Solve task did not complete: {}", err);
            error_response(
                HttpResponse::InternalServerError(),
                "Something went wrong".to_string(),
            )
        }
    }
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// GET /solvers
pub async fn solvers() -> impl Responder {
    let names: Vec<&str> = SolverType::available()
        .iter()
        .map(SolverType::as_str)
        .collect();
    HttpResponse::Ok().json(serde_json::json!({ "solvers": names }))
}

/// JSON extractor settings: payload limit and a JSON body for malformed requests
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ApiError { error: err_string }),
            )
            .into()
        })
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/solve", web::post().to(solve))
        .route("/health", web::get().to(health_check))
        .route("/solvers", web::get().to(solvers));
}

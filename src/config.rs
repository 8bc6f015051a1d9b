use log::warn;
use std::env;

use crate::domain::solver_factory::SolverType;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub json_limit: usize,
    pub default_solver: SolverType,
}

impl ServerConfig {
    /// Read `PORT`, `JSON_PAYLOAD_LIMIT` and `SOLVER`; call `dotenv()` first to pick up `.env`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let json_limit = lookup("JSON_PAYLOAD_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_JSON_LIMIT);

        let default_solver = match lookup("SOLVER") {
            Some(name) => SolverType::from_str(&name).unwrap_or_else(|| {
                warn!("Unknown SOLVER '{}', falling back to highs", name);
                SolverType::Highs
            }),
            None => SolverType::Highs,
        };

        ServerConfig {
            port,
            json_limit,
            default_solver,
        }
    }
}

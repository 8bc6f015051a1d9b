pub mod adapter;
pub mod assemble;
pub mod error;
pub mod model;
pub mod pool;
pub mod progress;
pub mod solve;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod status;
pub mod validate;

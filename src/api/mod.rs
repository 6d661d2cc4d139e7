pub mod routes;

pub use routes::ClearanceApiState;

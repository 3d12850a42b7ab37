//! Error types for fleetpulse

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unknown KPI type: {0}")]
    UnknownKpiType(String),
}

pub type Result<T> = std::result::Result<T, Error>;

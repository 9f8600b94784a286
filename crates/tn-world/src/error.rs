use thiserror::Error;
use tn_core::{NavError, StructureId};
use tn_motion::MotionError;

#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("navigation error: {0}")]
    Nav(#[from] NavError),

    #[error("motion error: {0}")]
    Motion(#[from] MotionError),

    #[error("{0} is not under construction")]
    NotUnderConstruction(StructureId),
}

pub type WorldResult<T> = Result<T, WorldError>;

pub mod auth;
pub mod generation;

pub use auth::{LoginRequest, RegisterRequest, Session, User};
pub use generation::{
    ContentUpdate, Generation, GenerationPage, GenerationResult, GenerationStatus,
    GenerationTime, GenerationView, ListFilter, Pagination, PrelightReport, PublishState,
    DEFAULT_FILENAME,
};

use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper used by most backend responses
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
}

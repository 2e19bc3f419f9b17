//! Application services for facility management.

mod registry;

pub use registry::{
    CascadeFailure, CascadeReport, CascadeStage, CreateAssetRequest, CreateLocationRequest,
    FacilityService, FacilityServiceError, FacilityServiceResult,
};

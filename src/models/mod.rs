pub mod request;
pub mod response;

pub use request::{OptimizeRequest, UploadedFile};
pub use response::{ExtractData, ExtractResponse, OptimizationResult, OptimizeResponse};

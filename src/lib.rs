pub mod caom2;
pub mod constants;
mod conversion;
pub mod geolocation;
pub mod header_store;
pub mod headers;
pub mod ingest;
pub mod ingest_errors;
pub mod instrument;
pub mod omp;
pub mod project_code;
pub mod proposals;
pub mod repository;
pub mod translate;

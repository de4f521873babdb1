pub mod backend;
pub mod error;
pub mod filename;
pub mod service;

pub use backend::SynthesisBackend;
pub use error::{ConversionError, ExtractionError, SynthesisError};
pub use service::{ConversionRequest, ConversionResult, ConversionService, ConversionServiceApi};

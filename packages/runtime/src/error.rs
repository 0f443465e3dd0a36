//! Build-time error taxonomy for the service model.
//!
//! Request-time dispatch faults live in [`crate::dispatch`]; everything
//! here is fatal at startup and propagates to the service initializer.

use soapwire_core::CodecError;
use thiserror::Error;

/// Fatal failures while building a service model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelBuildError {
    /// `populate_maps` never ran before `freeze`.
    #[error("handler and payload indices were not populated before freeze")]
    MapsNotPopulated,

    /// The external codec generator failed. The type context stays unset,
    /// so a later `finalize_types` call may retry.
    #[error("codec generation failed for the service model")]
    CodecGeneration(#[source] CodecError),
}

//! soapwire Runtime — service model lifecycle and operation dispatch.
//!
//! Data flow: the host's contract parser feeds a [`ServiceModelBuilder`],
//! which is populated, frozen against the port's wire metadata, and
//! finalized into an immutable [`ServiceModel`] with a one-shot codec
//! table. Operation finders are built from the frozen model (or directly
//! from contract bindings) and serve unsynchronized per-request
//! `resolve` calls for the life of the service.

pub mod dispatch;
pub mod error;
pub mod model;

pub use dispatch::{
    ActionBasedFinder, DispatchError, DispatchFault, DuplicateSignature, OperationDispatcher,
    OperationFinder, OperationSignature, PayloadBasedFinder, Resolution,
};
pub use error::ModelBuildError;
pub use model::binding::apply_binding;
pub use model::operation::{FaultDescriptor, HandlerId, OperationDescriptor};
pub use model::type_context::TypeContext;
pub use model::{
    DeclaredOperationsPopulator, IndexPopulator, ModelIndices, ServiceModel, ServiceModelBuilder,
};

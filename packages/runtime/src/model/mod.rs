//! Service model lifecycle: mutable builder, frozen read-only model.
//!
//! The builder is populated from contract-derived operation declarations,
//! indexed via [`ServiceModelBuilder::populate_maps`], and frozen against
//! the port's wire metadata. `freeze` consumes the builder, so the
//! populate → freeze sequence runs at most once per model; the resulting
//! [`ServiceModel`] is a distinct type with no mutating surface beyond
//! [`ServiceModel::finalize_types`], which itself runs before the model is
//! shared. After finalize the model supports unsynchronized concurrent
//! reads for the service's lifetime.

pub mod binding;
pub mod operation;
pub mod type_context;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use soapwire_core::{Codec, CodecGenerator, Direction, PortBinding, QName, TypeDescriptor};
use tracing::debug;

use crate::error::ModelBuildError;
use binding::apply_binding;
use operation::{HandlerId, OperationDescriptor};
use type_context::TypeContext;

/// Indices derived from the declared operations, keyed into the operation
/// list by position.
#[derive(Debug, Default, Clone)]
pub struct ModelIndices {
    /// Handler identity to operation position.
    pub by_handler: HashMap<HandlerId, usize>,
    /// Request payload name to operation position; bodiless operations are
    /// indexed under the empty-payload sentinel.
    pub by_payload_name: HashMap<QName, usize>,
}

/// Strategy that derives [`ModelIndices`] from the declared operations.
/// Hosts with their own modeling step (generated stubs, annotation scans)
/// substitute their own implementation.
pub trait IndexPopulator {
    /// Build the indices.
    fn populate(&self, operations: &[OperationDescriptor]) -> ModelIndices;
}

/// Default populator: one handler entry and one payload entry per declared
/// operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredOperationsPopulator;

impl IndexPopulator for DeclaredOperationsPopulator {
    fn populate(&self, operations: &[OperationDescriptor]) -> ModelIndices {
        let mut indices = ModelIndices::default();
        for (position, op) in operations.iter().enumerate() {
            indices.by_handler.insert(op.handler().clone(), position);
            let payload = op
                .request_payload_name()
                .cloned()
                .unwrap_or_else(QName::empty_payload);
            indices.by_payload_name.insert(payload, position);
        }
        indices
    }
}

/// Mutable builder for a service model.
#[derive(Debug, Default)]
pub struct ServiceModelBuilder {
    service_name: Option<QName>,
    port_name: Option<QName>,
    target_namespace: String,
    contract_location: Option<String>,
    operations: Vec<OperationDescriptor>,
    extra_types: Vec<TypeDescriptor>,
    indices: Option<ModelIndices>,
}

impl ServiceModelBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service name.
    pub fn set_service_name(&mut self, name: QName) {
        self.service_name = Some(name);
    }

    /// Set the port name.
    pub fn set_port_name(&mut self, name: QName) {
        self.port_name = Some(name);
    }

    /// Set the target namespace of the contract.
    pub fn set_target_namespace(&mut self, namespace: impl Into<String>) {
        self.target_namespace = namespace.into();
    }

    /// Record where the contract was loaded from.
    pub fn set_contract_location(&mut self, location: impl Into<String>) {
        self.contract_location = Some(location.into());
    }

    /// Declare an operation.
    pub fn add_operation(&mut self, operation: OperationDescriptor) {
        self.operations.push(operation);
    }

    /// Register externally supplied types to include in codec generation
    /// beyond what the operations reference.
    pub fn add_extra_types(&mut self, types: impl IntoIterator<Item = TypeDescriptor>) {
        self.extra_types.extend(types);
    }

    /// Operations declared so far.
    #[must_use]
    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    /// Build the handler and payload indices with the default populator.
    /// No-op if the indices already exist.
    pub fn populate_maps(&mut self) {
        self.populate_maps_with(&DeclaredOperationsPopulator);
    }

    /// Build the indices with a host-supplied populator. No-op if the
    /// indices already exist.
    pub fn populate_maps_with(&mut self, populator: &dyn IndexPopulator) {
        if self.indices.is_some() {
            return;
        }
        self.indices = Some(populator.populate(&self.operations));
    }

    /// Attach wire metadata from the bound port and produce the read-only
    /// model: resolve request and response wrapper bindings for every
    /// operation, capture the extracted attachment parts, and populate the
    /// contract-name index.
    ///
    /// # Errors
    ///
    /// Returns [`ModelBuildError::MapsNotPopulated`] if `populate_maps`
    /// never ran.
    pub fn freeze(mut self, port: &dyn PortBinding) -> Result<ServiceModel, ModelBuildError> {
        let indices = self.indices.take().ok_or(ModelBuildError::MapsNotPopulated)?;

        let mut by_contract_name = HashMap::with_capacity(self.operations.len());
        for (position, op) in self.operations.iter_mut().enumerate() {
            let name = op.name().clone();
            if let Some(wrapper) = op.request_wrapper_mut() {
                let attachments = apply_binding(&name, wrapper, port, Direction::In);
                op.set_request_attachments(attachments);
            }
            if let Some(wrapper) = op.response_wrapper_mut() {
                let attachments = apply_binding(&name, wrapper, port, Direction::Out);
                op.set_response_attachments(attachments);
            }
            by_contract_name.insert(name, position);
        }

        debug!(operations = self.operations.len(), "service model frozen");
        Ok(ServiceModel {
            service_name: self.service_name,
            port_name: self.port_name,
            target_namespace: self.target_namespace,
            contract_location: self.contract_location,
            operations: self.operations,
            by_handler: indices.by_handler,
            by_payload_name: indices.by_payload_name,
            by_contract_name,
            extra_types: self.extra_types,
            type_context: None,
        })
    }
}

/// Frozen service model: operations, lookup indices, and (after
/// [`finalize_types`](Self::finalize_types)) the codec table. Read-only for
/// the service's lifetime.
#[derive(Debug)]
pub struct ServiceModel {
    service_name: Option<QName>,
    port_name: Option<QName>,
    target_namespace: String,
    contract_location: Option<String>,
    operations: Vec<OperationDescriptor>,
    by_handler: HashMap<HandlerId, usize>,
    by_payload_name: HashMap<QName, usize>,
    by_contract_name: HashMap<QName, usize>,
    extra_types: Vec<TypeDescriptor>,
    type_context: Option<TypeContext>,
}

impl ServiceModel {
    /// All operations, in declaration order.
    #[must_use]
    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    /// Operation implemented by a handler.
    #[must_use]
    pub fn by_handler(&self, handler: &HandlerId) -> Option<&OperationDescriptor> {
        self.by_handler
            .get(handler)
            .map(|&position| &self.operations[position])
    }

    /// Operation whose request payload carries this element name.
    #[must_use]
    pub fn by_payload_name(&self, payload: &QName) -> Option<&OperationDescriptor> {
        self.by_payload_name
            .get(payload)
            .map(|&position| &self.operations[position])
    }

    /// Operation by its contract operation name.
    #[must_use]
    pub fn by_contract_name(&self, name: &QName) -> Option<&OperationDescriptor> {
        self.by_contract_name
            .get(name)
            .map(|&position| &self.operations[position])
    }

    /// Whether `tag_name` is a declared fault of the handler's operation.
    #[must_use]
    pub fn is_known_fault(&self, handler: &HandlerId, tag_name: &QName) -> bool {
        self.by_handler(handler)
            .is_some_and(|op| op.faults().iter().any(|f| f.tag_name == *tag_name))
    }

    /// Build the type context: gather every type the operations reference,
    /// union the extra types, run the codec generator once, and derive the
    /// known-namespace set. No-op if the context already exists; on
    /// generator failure the context stays unset so a later call retries.
    ///
    /// # Errors
    ///
    /// Returns [`ModelBuildError::CodecGeneration`] when the generator or a
    /// codec lookup fails.
    pub fn finalize_types(&mut self, generator: &dyn CodecGenerator) -> Result<(), ModelBuildError> {
        if self.type_context.is_some() {
            return Ok(());
        }
        let types = self.gather_types();
        let context = TypeContext::build(&types, generator)?;
        debug!(
            types = types.len(),
            namespaces = context.known_namespace_uris().len(),
            "type context finalized"
        );
        self.type_context = Some(context);
        Ok(())
    }

    fn gather_types(&self) -> Vec<TypeDescriptor> {
        let mut types = self.extra_types.clone();
        for op in &self.operations {
            op.collect_types(&mut types);
        }
        // One codec per distinct type, even when operations share payloads.
        let mut seen = HashSet::new();
        types.retain(|ty| seen.insert(ty.clone()));
        types
    }

    /// Codec for a type referenced by this model.
    ///
    /// # Panics
    ///
    /// Panics if `finalize_types` has not run, or if `ty` was not covered
    /// by the finalize pass. Both are integration bugs between build and
    /// use, not runtime conditions.
    #[must_use]
    pub fn codec_for(&self, ty: &TypeDescriptor) -> Arc<dyn Codec> {
        let context = self
            .type_context
            .as_ref()
            .expect("codec lookup before finalize_types");
        context
            .codec(ty)
            .unwrap_or_else(|| panic!("no codec for {ty:?}: type not referenced by this model"))
            .clone()
    }

    /// The finalized type context, if `finalize_types` has succeeded.
    #[must_use]
    pub fn type_context(&self) -> Option<&TypeContext> {
        self.type_context.as_ref()
    }

    /// Known namespaces of the finalized schema; empty before finalize.
    #[must_use]
    pub fn known_namespace_uris(&self) -> &[String] {
        self.type_context
            .as_ref()
            .map_or(&[], TypeContext::known_namespace_uris)
    }

    /// Service name, if declared.
    #[must_use]
    pub fn service_name(&self) -> Option<&QName> {
        self.service_name.as_ref()
    }

    /// Port name, if declared.
    #[must_use]
    pub fn port_name(&self) -> Option<&QName> {
        self.port_name.as_ref()
    }

    /// Target namespace of the contract.
    #[must_use]
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Where the contract was loaded from, if recorded.
    #[must_use]
    pub fn contract_location(&self) -> Option<&str> {
        self.contract_location.as_deref()
    }
}

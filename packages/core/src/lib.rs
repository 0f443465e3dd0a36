//! soapwire Core — contract data model, wire roles, and the codec and
//! message seams consumed by the runtime dispatch layer.

pub mod codec;
pub mod contract;
pub mod message;
pub mod param;
pub mod qname;
pub mod typeref;

pub use codec::{Codec, CodecError, CodecGenerator, CodecSet};
pub use contract::{
    AddressingVersion, ContractOperation, MessageExchangePattern, PortBinding, TablePortBinding,
};
pub use message::{payload_qname, InboundMessage};
pub use param::{Direction, Parameter, WireBinding, WrapperParameter};
pub use qname::QName;
pub use typeref::TypeDescriptor;

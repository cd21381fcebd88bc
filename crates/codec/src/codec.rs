//! Sealed type registry.
//!
//! A [`Codec`] starts **Open**: concrete message types are registered under
//! permanent string tags. [`Codec::seal`] moves it to **Sealed** exactly once;
//! from then on registration panics and encode/decode are allowed. A sealed
//! codec is immutable and can be shared across threads behind an `Arc`.
//!
//! Wire format (bincode: varint ints, little endian, no trailing bytes):
//!
//! ```text
//! envelope = (tag: string, payload: bytes)
//! payload  = bincode(concrete value)
//! ```

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::errors::{CodecError, RegistrationError};
use crate::msgs::{MsgSwap, MsgSwapSend};
use crate::proposal::ParamsChangeProposal;

/// Upper bound on a single encoded message.
pub const MAX_MESSAGE_BYTES: u64 = 1 << 20;

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_MESSAGE_BYTES)
        .with_little_endian()
        .with_varint_encoding()
        .reject_trailing_bytes()
}

/// Every message or proposal kind the market module can put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleMsg {
    Swap(MsgSwap),
    SwapSend(MsgSwapSend),
    ParamsChange(ParamsChangeProposal),
}

impl ModuleMsg {
    fn concrete_type_id(&self) -> TypeId {
        match self {
            ModuleMsg::Swap(_) => TypeId::of::<MsgSwap>(),
            ModuleMsg::SwapSend(_) => TypeId::of::<MsgSwapSend>(),
            ModuleMsg::ParamsChange(_) => TypeId::of::<ParamsChangeProposal>(),
        }
    }

    /// Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        match self {
            ModuleMsg::Swap(_) => type_name::<MsgSwap>(),
            ModuleMsg::SwapSend(_) => type_name::<MsgSwapSend>(),
            ModuleMsg::ParamsChange(_) => type_name::<ParamsChangeProposal>(),
        }
    }

    fn encode_payload(&self) -> bincode::Result<Vec<u8>> {
        match self {
            ModuleMsg::Swap(msg) => wire_options().serialize(msg),
            ModuleMsg::SwapSend(msg) => wire_options().serialize(msg),
            ModuleMsg::ParamsChange(proposal) => wire_options().serialize(proposal),
        }
    }

    fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            ModuleMsg::Swap(msg) => serde_json::to_value(msg),
            ModuleMsg::SwapSend(msg) => serde_json::to_value(msg),
            ModuleMsg::ParamsChange(proposal) => serde_json::to_value(proposal),
        }
    }
}

impl From<MsgSwap> for ModuleMsg {
    fn from(msg: MsgSwap) -> Self {
        ModuleMsg::Swap(msg)
    }
}

impl From<MsgSwapSend> for ModuleMsg {
    fn from(msg: MsgSwapSend) -> Self {
        ModuleMsg::SwapSend(msg)
    }
}

impl From<ParamsChangeProposal> for ModuleMsg {
    fn from(proposal: ParamsChangeProposal) -> Self {
        ModuleMsg::ParamsChange(proposal)
    }
}

/// A concrete type that can be registered with the codec.
pub trait Concrete: Serialize + DeserializeOwned + Into<ModuleMsg> + 'static {}

impl Concrete for MsgSwap {}
impl Concrete for MsgSwapSend {}
impl Concrete for ParamsChangeProposal {}

type DecodeFn = fn(&[u8]) -> Result<ModuleMsg, CodecError>;

fn decode_concrete<T: Concrete>(payload: &[u8]) -> Result<ModuleMsg, CodecError> {
    let value: T = wire_options()
        .deserialize(payload)
        .map_err(CodecError::Malformed)?;
    Ok(value.into())
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    tag: String,
    payload: Vec<u8>,
}

#[derive(Clone, Copy)]
struct Registration {
    type_name: &'static str,
    decode: DecodeFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecState {
    Open,
    Sealed,
}

pub struct Codec {
    state: CodecState,
    by_tag: BTreeMap<&'static str, Registration>,
    by_type: HashMap<TypeId, &'static str>,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    pub fn new() -> Self {
        Self {
            state: CodecState::Open,
            by_tag: BTreeMap::new(),
            by_type: HashMap::new(),
        }
    }

    pub fn state(&self) -> CodecState {
        self.state
    }

    pub fn is_sealed(&self) -> bool {
        self.state == CodecState::Sealed
    }

    pub fn try_register<T: Concrete>(&mut self, tag: &'static str) -> Result<(), RegistrationError> {
        let type_name = type_name::<T>();
        if self.is_sealed() {
            return Err(RegistrationError::Sealed { tag, type_name });
        }
        if let Some(existing) = self.by_tag.get(tag) {
            return Err(RegistrationError::DuplicateTag {
                tag,
                existing: existing.type_name,
                type_name,
            });
        }
        if let Some(existing) = self.by_type.get(&TypeId::of::<T>()) {
            return Err(RegistrationError::DuplicateType {
                tag,
                existing: *existing,
                type_name,
            });
        }

        self.by_tag.insert(
            tag,
            Registration {
                type_name,
                decode: decode_concrete::<T>,
            },
        );
        self.by_type.insert(TypeId::of::<T>(), tag);
        debug!(target: "codec", tag, type_name, "registered concrete type");
        Ok(())
    }

    /// Register `T` under `tag`.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate tag, a type registered twice, or any call after
    /// [`Codec::seal`]. These are startup configuration errors; a node must
    /// not run with a registry that could differ from its peers'.
    pub fn register<T: Concrete>(&mut self, tag: &'static str) {
        if let Err(err) = self.try_register::<T>(tag) {
            panic!("{err}");
        }
    }

    /// Forbid further registration. Irreversible.
    pub fn seal(&mut self) {
        if self.is_sealed() {
            return;
        }
        self.state = CodecState::Sealed;
        info!(target: "codec", registered = self.by_tag.len(), "codec sealed");
    }

    pub fn tag_of<T: Concrete>(&self) -> Option<&'static str> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    pub fn tag_for(&self, msg: &ModuleMsg) -> Result<&'static str, CodecError> {
        self.by_type
            .get(&msg.concrete_type_id())
            .copied()
            .ok_or(CodecError::UnregisteredType(msg.type_name()))
    }

    /// Registered tags in lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_tag.keys().copied()
    }

    pub fn encode(&self, msg: &ModuleMsg) -> Result<Vec<u8>, CodecError> {
        self.ensure_sealed()?;
        let tag = self.tag_for(msg)?;
        let payload = msg
            .encode_payload()
            .map_err(|source| CodecError::Encode { tag, source })?;
        let envelope = Envelope {
            tag: tag.to_string(),
            payload,
        };
        wire_options()
            .serialize(&envelope)
            .map_err(|source| CodecError::Encode { tag, source })
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<ModuleMsg, CodecError> {
        self.ensure_sealed()?;
        let envelope: Envelope = wire_options()
            .deserialize(bytes)
            .map_err(CodecError::Malformed)?;
        let registration = self
            .by_tag
            .get(envelope.tag.as_str())
            .ok_or_else(|| CodecError::UnknownTag(envelope.tag.clone()))?;
        (registration.decode)(&envelope.payload)
    }

    /// Tagged JSON rendering: `{"type": <tag>, "value": <fields>}`.
    pub fn to_json(&self, msg: &ModuleMsg) -> Result<serde_json::Value, CodecError> {
        let tag = self.tag_for(msg)?;
        Ok(serde_json::json!({
            "type": tag,
            "value": msg.to_json_value()?,
        }))
    }

    fn ensure_sealed(&self) -> Result<(), CodecError> {
        if !self.is_sealed() {
            return Err(CodecError::NotSealed);
        }
        Ok(())
    }
}

use id_arena::Id;

use crate::block::BlockData;
use crate::def::{FctDefId, InstDefId};
use crate::inst::InstData;
use crate::ty::LiteralType;

/// Stable identity of any IR entity (constant, definition reference,
/// instruction or basic block). Consumers may key side tables off it.
pub type ValueId = Id<ValueData>;

/// Handle to a value known to be an instruction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct InstId(pub(crate) ValueId);

impl InstId {
    pub fn value(self) -> ValueId {
        self.0
    }
}

/// Handle to a value known to be a basic block.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct BlockId(pub(crate) ValueId);

impl BlockId {
    pub fn value(self) -> ValueId {
        self.0
    }
}

/// One entity in the function's arena.
///
/// `uses` is an ordered multiset with one entry per operand slot that
/// currently references this value; the use-count therefore equals the
/// operand-reference count, not the number of distinct using instructions.
pub struct ValueData {
    pub(crate) ty: LiteralType,
    pub(crate) name: String,
    pub(crate) uses: Vec<InstId>,
    pub(crate) kind: ValueKind,
}

impl ValueData {
    pub(crate) fn new(ty: LiteralType, name: String, kind: ValueKind) -> ValueData {
        ValueData {
            ty,
            name,
            uses: Vec::new(),
            kind,
        }
    }

    pub fn ty(&self) -> LiteralType {
        self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uses(&self) -> &[InstId] {
        &self.uses
    }

    pub fn use_count(&self) -> usize {
        self.uses.len()
    }

    pub fn is_used(&self) -> bool {
        !self.uses.is_empty()
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Registers one use for one operand slot. Callers invoke this exactly
    /// once per slot change; it deduplicates nothing.
    pub(crate) fn add_use(&mut self, user: InstId) {
        self.uses.push(user);
    }

    /// Releases the use entry of one operand slot: removes exactly one
    /// occurrence, never more.
    pub(crate) fn remove_use(&mut self, user: InstId) {
        let idx = self
            .uses
            .iter()
            .position(|u| *u == user)
            .expect("use entry missing");
        self.uses.remove(idx);
    }
}

pub enum ValueKind {
    Const(ConstKind),
    Def(DefRef),
    Inst(InstData),
    Block(BlockData),
    /// Freed arena slot. Reaching one through an operand or a CFG edge is a
    /// structural-invariant violation.
    Removed,
}

/// Literal constants. Leaf producers: no operands, no owning block,
/// immutable after construction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConstKind {
    Int(i64),
    UInt(u64),
    Str(String),
}

/// Reference to an externally owned definition, usable as operand 0 of a
/// call-like instruction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DefRef {
    /// Resolved machine-instruction definition.
    Inst(InstDefId),
    /// Resolved user-defined function.
    Fct(FctDefId),
    /// Unresolved textual label, awaiting symbol resolution.
    Label(String),
}

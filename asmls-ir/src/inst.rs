use crate::value::{BlockId, ValueId};

/// Instruction payload: a kind tag, the owning block (if any) and a uniform
/// ordered operand list.
///
/// Operands are non-owning forward edges into the arena; the matching
/// backward edges live in each operand's use list. All operand mutation goes
/// through the builder so the two halves stay consistent.
pub struct InstData {
    pub(crate) kind: InstKind,
    pub(crate) block: Option<BlockId>,
    pub(crate) operands: Vec<ValueId>,
}

impl InstData {
    pub(crate) fn new(kind: InstKind, operands: Vec<ValueId>) -> InstData {
        InstData {
            kind,
            block: None,
            operands,
        }
    }

    pub fn kind(&self) -> InstKind {
        self.kind
    }

    /// The owning block, or `None` while detached (newly created, removed or
    /// replaced-out).
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub fn operands(&self) -> &[ValueId] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<ValueId> {
        self.operands.get(index).copied()
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum InstKind {
    /// Register-unification marker: operands are the reaching definitions,
    /// in predecessor order. Produces no machine code.
    Phi,
    /// Concrete machine instruction; operand 0 is the instruction
    /// definition, operands 1.. the arguments.
    Cpu,
    /// Call; operand 0 is the callee (resolved function or unresolved
    /// label), operands 1.. the arguments.
    Call,
    /// Unconditional branch; operand 0 is the target block.
    Br,
    /// Conditional branch; operand 0 is the condition, operands 1 and 2 the
    /// then- and else-blocks.
    CondBr,
    /// Return, with an optional operand 0.
    Ret,
}

impl InstKind {
    /// Terminators end a block's control flow.
    pub fn is_terminator(&self) -> bool {
        match *self {
            InstKind::Br | InstKind::CondBr | InstKind::Ret => true,
            InstKind::Phi | InstKind::Cpu | InstKind::Call => false,
        }
    }

    /// Call-like instructions carry a callee in operand 0.
    pub fn is_call_like(&self) -> bool {
        match *self {
            InstKind::Cpu | InstKind::Call => true,
            _ => false,
        }
    }
}

use id_arena::Arena;

use crate::block::BlockData;
use crate::def::DefTable;
use crate::dom;
use crate::error::IrError;
use crate::inst::{InstData, InstKind};
use crate::value::{BlockId, DefRef, InstId, ValueData, ValueId, ValueKind};
use crate::visit::InstVisitor;

/// A function: the arena of IR entities plus the ordered linear layout of
/// its basic blocks.
///
/// The linear order determines fallthrough placement in the eventual
/// execution segment and is independent of the CFG edges. All mutation goes
/// through [`IrBuilder`](crate::builder::IrBuilder); this type only exposes
/// the read/query surface.
pub struct Function {
    name: String,
    pub(crate) values: Arena<ValueData>,
    pub(crate) block_order: Vec<BlockId>,
    pub(crate) entry: Option<BlockId>,
}

impl Function {
    pub fn new(name: &str) -> Function {
        Function {
            name: name.into(),
            values: Arena::new(),
            block_order: Vec::new(),
            entry: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, id: ValueId) -> &ValueData {
        &self.values[id]
    }

    pub(crate) fn value_mut(&mut self, id: ValueId) -> &mut ValueData {
        &mut self.values[id]
    }

    pub(crate) fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn inst(&self, id: InstId) -> &InstData {
        match self.values[id.0].kind {
            ValueKind::Inst(ref data) => data,
            ValueKind::Removed => panic!("instruction was freed"),
            _ => panic!("value is not an instruction"),
        }
    }

    pub(crate) fn inst_mut(&mut self, id: InstId) -> &mut InstData {
        match self.values[id.0].kind {
            ValueKind::Inst(ref mut data) => data,
            ValueKind::Removed => panic!("instruction was freed"),
            _ => panic!("value is not an instruction"),
        }
    }

    pub fn block(&self, id: BlockId) -> &BlockData {
        match self.values[id.0].kind {
            ValueKind::Block(ref data) => data,
            ValueKind::Removed => panic!("block was freed"),
            _ => panic!("value is not a basic block"),
        }
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut BlockData {
        match self.values[id.0].kind {
            ValueKind::Block(ref mut data) => data,
            ValueKind::Removed => panic!("block was freed"),
            _ => panic!("value is not a basic block"),
        }
    }

    /// Checked narrowing of an untyped value handle.
    pub fn try_inst(&self, id: ValueId) -> Result<InstId, IrError> {
        match self.values[id].kind {
            ValueKind::Inst(_) => Ok(InstId(id)),
            _ => Err(IrError::NotAnInst(id)),
        }
    }

    pub fn try_block(&self, id: ValueId) -> Result<BlockId, IrError> {
        match self.values[id].kind {
            ValueKind::Block(_) => Ok(BlockId(id)),
            _ => Err(IrError::NotABlock(id)),
        }
    }

    /// The callee of a call-like instruction (operand 0). It is a
    /// programming error to call this on a non-call instruction or before a
    /// definition value has been installed as operand 0.
    pub fn callee(&self, inst: InstId) -> &DefRef {
        let data = self.inst(inst);
        assert!(data.kind.is_call_like(), "callee of non-call instruction");
        let op0 = data.operand(0).expect("call without callee operand");
        match self.values[op0].kind {
            ValueKind::Def(ref def) => def,
            _ => panic!("operand 0 is not a definition"),
        }
    }

    pub fn entry_block(&self) -> Option<BlockId> {
        self.entry
    }

    /// Linear block layout, distinct from the CFG.
    pub fn block_order(&self) -> &[BlockId] {
        &self.block_order
    }

    pub(crate) fn block_position(&self, block: BlockId) -> Option<usize> {
        self.block_order.iter().position(|b| *b == block)
    }

    /// Whether `block` comes after `other` in the linear layout. False when
    /// the blocks are equal or either is not part of the layout.
    pub fn is_after(&self, block: BlockId, other: BlockId) -> bool {
        if block == other {
            return false;
        }

        match (self.block_position(block), self.block_position(other)) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    /// The block's last instruction, if it is a terminator.
    ///
    /// A non-empty block without a trailing terminator reports `None`; that
    /// is the ordinary mid-construction state.
    pub fn terminator(&self, block: BlockId) -> Option<InstId> {
        let last = self.block(block).last()?;

        if self.inst(last).kind.is_terminator() {
            Some(last)
        } else {
            None
        }
    }

    /// A block is complete when it ends in a terminator or in a call whose
    /// resolved callee is statically known not to return.
    pub fn is_complete(&self, block: BlockId, defs: &DefTable) -> bool {
        if self.terminator(block).is_some() {
            return true;
        }

        let last = match self.block(block).last() {
            Some(last) => last,
            None => return false,
        };

        let data = self.inst(last);

        if !data.kind.is_call_like() {
            return false;
        }

        let op0 = match data.operand(0) {
            Some(op0) => op0,
            None => return false,
        };

        match self.values[op0].kind {
            ValueKind::Def(DefRef::Inst(id)) => defs.instruction(id).no_return,
            ValueKind::Def(DefRef::Fct(id)) => defs.function(id).no_return,
            // An unresolved label is never statically known to diverge.
            _ => false,
        }
    }

    /// All blocks dominating `block`, immediate dominator first, entry
    /// last. The block itself is excluded. Empty for the entry block and for
    /// unreachable blocks.
    pub fn dominators(&self, block: BlockId) -> Vec<BlockId> {
        dom::dominators(self, block)
    }

    /// The unique closest dominator, excluding the block itself. `None` for
    /// the entry block and for unreachable blocks.
    pub fn immediate_dominator(&self, block: BlockId) -> Option<BlockId> {
        dom::immediate_dominator(self, block)
    }

    /// Double dispatch to the handler for the instruction's concrete kind.
    pub fn accept(&self, inst: InstId, visitor: &mut dyn InstVisitor) {
        match self.inst(inst).kind {
            InstKind::Phi => visitor.visit_phi(self, inst),
            InstKind::Cpu => visitor.visit_cpu(self, inst),
            InstKind::Call => visitor.visit_call(self, inst),
            InstKind::Br => visitor.visit_br(self, inst),
            InstKind::CondBr => visitor.visit_cond_br(self, inst),
            InstKind::Ret => visitor.visit_ret(self, inst),
        }
    }

    /// Consistency check over all structural invariants. Every failure is
    /// fatal: downstream passes assume a sound graph and would otherwise
    /// produce silently wrong results.
    pub fn verify(&self) {
        for &b in &self.block_order {
            let data = self.block(b);

            for (idx, &i) in data.code.iter().enumerate() {
                let inst = self.inst(i);
                assert!(
                    inst.block == Some(b),
                    "instruction back-reference does not match owning block"
                );

                let first = data
                    .code
                    .iter()
                    .position(|c| *c == i)
                    .expect("instruction missing from own block");
                assert!(first == idx, "instruction appears twice in block");

                if inst.kind.is_terminator() {
                    assert!(idx + 1 == data.code.len(), "instruction follows terminator");
                }
            }

            for &s in &data.successors {
                let fwd = data.successors.iter().filter(|x| **x == s).count();
                let back = self
                    .block(s)
                    .predecessors
                    .iter()
                    .filter(|p| **p == b)
                    .count();
                assert!(fwd == back, "predecessor/successor lists out of sync");
            }

            for &p in &data.predecessors {
                let back = data.predecessors.iter().filter(|x| **x == p).count();
                let fwd = self.block(p).successors.iter().filter(|s| **s == b).count();
                assert!(fwd == back, "predecessor/successor lists out of sync");
            }
        }

        for (id, value) in self.values.iter() {
            if let ValueKind::Inst(ref data) = value.kind {
                let user = InstId(id);

                for &op in &data.operands {
                    if let ValueKind::Removed = self.values[op].kind {
                        panic!("operand references freed value");
                    }

                    let slots = data.operands.iter().filter(|o| **o == op).count();
                    let entries = self.values[op].uses.iter().filter(|u| **u == user).count();
                    assert!(slots == entries, "use list out of sync with operand slots");
                }
            }

            for &u in &value.uses {
                let slots = self.inst(u).operands.iter().filter(|o| **o == id).count();
                let entries = value.uses.iter().filter(|x| **x == u).count();
                assert!(slots == entries, "dangling use entry");
            }
        }

        if let Some(entry) = self.entry {
            let reachable = dom::reachable(self, entry);

            for &b in &self.block_order {
                if !reachable.contains(b.0.index()) {
                    continue;
                }

                let data = self.block(b);

                if b != entry {
                    assert!(
                        !data.predecessors.is_empty(),
                        "reachable block without predecessor"
                    );
                }

                for &i in &data.code {
                    let inst = self.inst(i);
                    if inst.kind == InstKind::Phi {
                        assert!(
                            inst.operands.len() == data.predecessors.len(),
                            "phi operand count does not match predecessors"
                        );
                    }
                }
            }
        }
    }
}

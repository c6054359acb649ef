use crate::def::{FctDefId, InstDefId};
use crate::error::IrError;
use crate::function::Function;
use crate::inst::{InstData, InstKind};
use crate::ty::LiteralType;
use crate::value::{BlockId, ConstKind, DefRef, InstId, ValueData, ValueId, ValueKind};

/// Construction-phase capability over a function.
///
/// Every structural edit lives here: value and instruction creation, the
/// operand primitives, use-list transfer, block sequence and CFG edits.
/// Consumers that only analyze or print a function never see this type;
/// they work against the read surface of [`Function`].
///
/// Mutations flow block -> instruction -> operand -> use-list so the two
/// halves of each edge (operand slot, use entry) never diverge.
pub struct IrBuilder<'a> {
    fct: &'a mut Function,
}

impl<'a> IrBuilder<'a> {
    pub fn new(fct: &'a mut Function) -> IrBuilder<'a> {
        IrBuilder { fct }
    }

    pub fn fct(&self) -> &Function {
        self.fct
    }

    // ---- value creation ----

    pub fn const_int(&mut self, value: i64, name: &str) -> ValueId {
        self.fct.values.alloc(ValueData::new(
            LiteralType::Int,
            name.into(),
            ValueKind::Const(ConstKind::Int(value)),
        ))
    }

    pub fn const_uint(&mut self, value: u64, name: &str) -> ValueId {
        self.fct.values.alloc(ValueData::new(
            LiteralType::UInt,
            name.into(),
            ValueKind::Const(ConstKind::UInt(value)),
        ))
    }

    pub fn const_str(&mut self, value: &str, name: &str) -> ValueId {
        self.fct.values.alloc(ValueData::new(
            LiteralType::String,
            name.into(),
            ValueKind::Const(ConstKind::Str(value.into())),
        ))
    }

    /// Definition value for a resolved machine instruction.
    pub fn inst_def(&mut self, def: InstDefId, name: &str) -> ValueId {
        self.fct.values.alloc(ValueData::new(
            LiteralType::Void,
            name.into(),
            ValueKind::Def(DefRef::Inst(def)),
        ))
    }

    /// Definition value for a resolved function.
    pub fn fct_def(&mut self, def: FctDefId, name: &str) -> ValueId {
        self.fct.values.alloc(ValueData::new(
            LiteralType::Void,
            name.into(),
            ValueKind::Def(DefRef::Fct(def)),
        ))
    }

    /// Unresolved callee label, to be resolved later via [`resolve_label`].
    ///
    /// [`resolve_label`]: IrBuilder::resolve_label
    pub fn label(&mut self, name: &str) -> ValueId {
        self.fct.values.alloc(ValueData::new(
            LiteralType::Void,
            name.into(),
            ValueKind::Def(DefRef::Label(name.into())),
        ))
    }

    // ---- instruction creation (detached) ----

    fn make_inst(
        &mut self,
        ty: LiteralType,
        kind: InstKind,
        operands: Vec<ValueId>,
        name: &str,
    ) -> InstId {
        let id = self.fct.values.alloc(ValueData::new(
            ty,
            name.into(),
            ValueKind::Inst(InstData::new(kind, operands.clone())),
        ));
        let inst = InstId(id);

        for op in operands {
            self.fct.value_mut(op).add_use(inst);
        }

        inst
    }

    /// Phi pseudo-instruction: one operand per reaching definition, in
    /// predecessor order.
    pub fn phi(&mut self, operands: Vec<ValueId>, name: &str) -> InstId {
        self.make_inst(LiteralType::Void, InstKind::Phi, operands, name)
    }

    /// Machine instruction; `def` must be an instruction-definition value.
    pub fn cpu(&mut self, def: ValueId, args: Vec<ValueId>, ty: LiteralType, name: &str) -> InstId {
        match self.fct.value(def).kind {
            ValueKind::Def(DefRef::Inst(_)) => {}
            _ => panic!("cpu callee is not an instruction definition"),
        }

        let mut operands = Vec::with_capacity(args.len() + 1);
        operands.push(def);
        operands.extend(args);
        self.make_inst(ty, InstKind::Cpu, operands, name)
    }

    /// Call; `callee` must be a definition value (resolved function or
    /// unresolved label).
    pub fn call(
        &mut self,
        callee: ValueId,
        args: Vec<ValueId>,
        ty: LiteralType,
        name: &str,
    ) -> InstId {
        match self.fct.value(callee).kind {
            ValueKind::Def(DefRef::Fct(_)) | ValueKind::Def(DefRef::Label(_)) => {}
            _ => panic!("call callee is not a function definition or label"),
        }

        let mut operands = Vec::with_capacity(args.len() + 1);
        operands.push(callee);
        operands.extend(args);
        self.make_inst(ty, InstKind::Call, operands, name)
    }

    pub fn br(&mut self, target: BlockId) -> InstId {
        self.make_inst(LiteralType::Void, InstKind::Br, vec![target.value()], "")
    }

    pub fn cond_br(&mut self, condition: ValueId, then_block: BlockId, else_block: BlockId) -> InstId {
        self.make_inst(
            LiteralType::Void,
            InstKind::CondBr,
            vec![condition, then_block.value(), else_block.value()],
            "",
        )
    }

    pub fn ret(&mut self, value: Option<ValueId>) -> InstId {
        let operands = match value {
            Some(v) => vec![v],
            None => Vec::new(),
        };
        self.make_inst(LiteralType::Void, InstKind::Ret, operands, "")
    }

    /// New detached instruction with the same kind, type and name,
    /// referencing the same operand values. Operands are shared SSA values,
    /// never copied.
    pub fn clone_inst(&mut self, inst: InstId) -> InstId {
        let ty = self.fct.value(inst.value()).ty();
        let name = self.fct.value(inst.value()).name().to_string();
        let kind = self.fct.inst(inst).kind();
        let operands = self.fct.inst(inst).operands().to_vec();

        self.make_inst(ty, kind, operands, &name)
    }

    // ---- blocks ----

    pub fn add_block(&mut self, name: &str) -> BlockId {
        let id = self.fct.values.alloc(ValueData::new(
            LiteralType::Void,
            name.into(),
            ValueKind::Block(crate::block::BlockData::new()),
        ));
        let block = BlockId(id);
        self.fct.block_order.push(block);
        block
    }

    pub fn set_entry(&mut self, block: BlockId) {
        self.fct.entry = Some(block);
    }

    // ---- operand primitives ----

    /// Appends a new operand slot and registers one use.
    pub fn add_operand(&mut self, inst: InstId, value: ValueId) {
        self.fct.inst_mut(inst).operands.push(value);
        self.fct.value_mut(value).add_use(inst);
    }

    /// Replaces slot `index`; the previous referent loses exactly one use,
    /// `value` gains exactly one. Returns the previous referent.
    pub fn set_operand(
        &mut self,
        inst: InstId,
        index: usize,
        value: ValueId,
    ) -> Result<ValueId, IrError> {
        let len = self.fct.inst(inst).operand_count();

        if index >= len {
            return Err(IrError::OperandIndexOutOfBounds { index, len });
        }

        let old = self.fct.inst(inst).operands()[index];

        if old != value {
            self.fct.inst_mut(inst).operands[index] = value;
            self.fct.value_mut(old).remove_use(inst);
            self.fct.value_mut(value).add_use(inst);
        }

        Ok(old)
    }

    /// Replaces every slot equal to `old` with `new`; returns the number of
    /// slots changed (0 if `old` is absent).
    pub fn replace_operand(&mut self, inst: InstId, old: ValueId, new: ValueId) -> usize {
        if old == new {
            return 0;
        }

        let mut count = 0;

        for slot in self.fct.inst_mut(inst).operands.iter_mut() {
            if *slot == old {
                *slot = new;
                count += 1;
            }
        }

        for _ in 0..count {
            self.fct.value_mut(old).remove_use(inst);
            self.fct.value_mut(new).add_use(inst);
        }

        count
    }

    /// Removes all operand slots, releasing one use each.
    pub fn clear_operands(&mut self, inst: InstId) {
        let operands = std::mem::take(&mut self.fct.inst_mut(inst).operands);

        for op in operands {
            self.fct.value_mut(op).remove_use(inst);
        }
    }

    /// Rewrites every operand slot holding `old` to hold `new`, transferring
    /// the use entries. Afterwards `old` has no uses. Replacing a value with
    /// itself is a no-op; types are not checked.
    pub fn replace_all_uses_with(&mut self, old: ValueId, new: ValueId) {
        if old == new {
            return;
        }

        loop {
            let user = match self.fct.value(old).uses().first() {
                Some(&user) => user,
                None => break,
            };

            self.replace_operand(user, old, new);
        }
    }

    // ---- block sequence edits ----

    /// Appends a detached instruction; the block takes ownership.
    pub fn push_back(&mut self, block: BlockId, inst: InstId) {
        assert!(
            self.fct.inst(inst).block().is_none(),
            "instruction already owned by a block"
        );

        self.fct.block_mut(block).code.push(inst);
        self.fct.inst_mut(inst).block = Some(block);
    }

    /// Detaches `inst` from `block` by identity. The remaining sequence
    /// stays contiguous; the instruction's operands and uses are untouched,
    /// so dangling uses of its result are the caller's responsibility.
    pub fn remove_inst(&mut self, block: BlockId, inst: InstId) {
        assert!(
            self.fct.inst(inst).block() == Some(block),
            "instruction not owned by this block"
        );

        let idx = self
            .fct
            .block(block)
            .code()
            .iter()
            .position(|c| *c == inst)
            .expect("instruction missing from block sequence");

        self.fct.block_mut(block).code.remove(idx);
        self.fct.inst_mut(inst).block = None;
    }

    /// Swaps `old` for the detached `new` at the same position. `old`
    /// becomes detached. Uses of `old`'s result are not rewritten; that is
    /// [`replace_all_uses_with`]'s job and deliberately separate.
    ///
    /// [`replace_all_uses_with`]: IrBuilder::replace_all_uses_with
    pub fn replace_inst(&mut self, old: InstId, new: InstId) {
        let block = self.fct.inst(old).block().expect("instruction not in a block");
        assert!(
            self.fct.inst(new).block().is_none(),
            "replacement already owned by a block"
        );

        let idx = self
            .fct
            .block(block)
            .code()
            .iter()
            .position(|c| *c == old)
            .expect("instruction missing from block sequence");

        self.fct.block_mut(block).code[idx] = new;
        self.fct.inst_mut(new).block = Some(block);
        self.fct.inst_mut(old).block = None;
    }

    /// Moves all of `other`'s instructions onto `block`'s tail and relinks
    /// `other`'s successors to `block` (without duplicating edges). `other`
    /// is left empty and edge-less; freeing it is the caller's decision.
    pub fn merge_back(&mut self, block: BlockId, other: BlockId) {
        assert!(block != other, "merge of block with itself");

        let moved = std::mem::take(&mut self.fct.block_mut(other).code);
        for &i in &moved {
            self.fct.inst_mut(i).block = Some(block);
        }
        self.fct.block_mut(block).code.extend(moved);

        let successors = std::mem::take(&mut self.fct.block_mut(other).successors);
        for s in successors {
            let pos = self
                .fct
                .block(s)
                .predecessors()
                .iter()
                .position(|p| *p == other)
                .expect("predecessor link missing");
            self.fct.block_mut(s).predecessors.remove(pos);

            if !self.fct.block(block).successors().contains(&s) {
                self.fct.block_mut(block).successors.push(s);
                self.fct.block_mut(s).predecessors.push(block);
            }
        }

        let predecessors = std::mem::take(&mut self.fct.block_mut(other).predecessors);
        for p in predecessors {
            let pos = self
                .fct
                .block(p)
                .successors()
                .iter()
                .position(|s| *s == other)
                .expect("successor link missing");
            self.fct.block_mut(p).successors.remove(pos);
        }
    }

    // ---- linear layout ----

    /// Repositions `block` directly after `other` in the linear layout.
    /// CFG edges are untouched.
    pub fn move_after(&mut self, block: BlockId, other: BlockId) {
        assert!(block != other, "move of block relative to itself");

        let from = self
            .fct
            .block_position(block)
            .expect("block not in function");
        self.fct.block_order.remove(from);

        let to = self
            .fct
            .block_position(other)
            .expect("block not in function");
        self.fct.block_order.insert(to + 1, block);
    }

    /// Repositions `block` directly before `other` in the linear layout.
    pub fn move_before(&mut self, block: BlockId, other: BlockId) {
        assert!(block != other, "move of block relative to itself");

        let from = self
            .fct
            .block_position(block)
            .expect("block not in function");
        self.fct.block_order.remove(from);

        let to = self
            .fct
            .block_position(other)
            .expect("block not in function");
        self.fct.block_order.insert(to, block);
    }

    // ---- CFG edges ----

    /// Links `successor` as a successor of `block`; both sides of the edge
    /// are updated in this call, partial states are never observable.
    pub fn link_successor(&mut self, block: BlockId, successor: BlockId) {
        self.fct.block_mut(block).successors.push(successor);
        self.fct.block_mut(successor).predecessors.push(block);
    }

    /// Removes one `block -> successor` edge, updating both sides.
    pub fn unlink_successor(&mut self, block: BlockId, successor: BlockId) {
        let pos = self
            .fct
            .block(block)
            .successors()
            .iter()
            .position(|s| *s == successor)
            .expect("successor not linked");
        self.fct.block_mut(block).successors.remove(pos);

        let pos = self
            .fct
            .block(successor)
            .predecessors()
            .iter()
            .position(|p| *p == block)
            .expect("predecessor link missing");
        self.fct.block_mut(successor).predecessors.remove(pos);
    }

    // ---- symbol resolution ----

    /// Resolves an unresolved label to a function-definition value: every
    /// call holding the label as callee is rewritten in place.
    pub fn resolve_label(&mut self, label: ValueId, resolved: ValueId) {
        match self.fct.value(label).kind {
            ValueKind::Def(DefRef::Label(_)) => {}
            _ => panic!("value is not an unresolved label"),
        }
        match self.fct.value(resolved).kind {
            ValueKind::Def(DefRef::Fct(_)) => {}
            _ => panic!("value is not a function definition"),
        }

        self.replace_all_uses_with(label, resolved);
    }

    // ---- arena release ----

    /// Frees an arena slot. The value must have no remaining uses; an
    /// instruction must be detached, a block empty, edge-less and not the
    /// entry. Its operand slots are released first.
    pub fn free_value(&mut self, value: ValueId) {
        assert!(
            !self.fct.value(value).is_used(),
            "freeing value with remaining uses"
        );

        match self.fct.value(value).kind {
            ValueKind::Inst(ref data) => {
                assert!(
                    data.block().is_none(),
                    "freeing instruction still owned by a block"
                );
            }
            ValueKind::Block(ref data) => {
                assert!(data.is_empty(), "freeing non-empty block");
                assert!(
                    data.predecessors().is_empty() && data.successors().is_empty(),
                    "freeing block with CFG edges"
                );
                assert!(
                    self.fct.entry != Some(BlockId(value)),
                    "freeing entry block"
                );
            }
            ValueKind::Const(_) | ValueKind::Def(_) => {}
            ValueKind::Removed => panic!("value already freed"),
        }

        if let ValueKind::Inst(_) = self.fct.value(value).kind {
            self.clear_operands(InstId(value));
        } else if let ValueKind::Block(_) = self.fct.value(value).kind {
            let pos = self
                .fct
                .block_position(BlockId(value))
                .expect("block not in function");
            self.fct.block_order.remove(pos);
        }

        self.fct.value_mut(value).kind = ValueKind::Removed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{DefTable, FunctionDefinition};
    use crate::value::ValueKind;

    fn fct_with_block() -> (Function, BlockId) {
        let mut fct = Function::new("f");
        let block = {
            let mut b = IrBuilder::new(&mut fct);
            let block = b.add_block("entry");
            b.set_entry(block);
            block
        };
        (fct, block)
    }

    #[test]
    fn operand_use_symmetry_after_edits() {
        let (mut fct, _block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let y = b.const_int(2, "y");
        let phi = b.phi(vec![x, x], "p");

        assert_eq!(b.fct().value(x).use_count(), 2);

        // set slot 1 to y: x loses exactly one use
        let old = b.set_operand(phi, 1, y).expect("in range");
        assert_eq!(old, x);
        assert_eq!(b.fct().value(x).use_count(), 1);
        assert_eq!(b.fct().value(y).use_count(), 1);

        b.add_operand(phi, x);
        assert_eq!(b.fct().value(x).use_count(), 2);

        let changed = b.replace_operand(phi, x, y);
        assert_eq!(changed, 2);
        assert_eq!(b.fct().value(x).use_count(), 0);
        assert_eq!(b.fct().value(y).use_count(), 3);

        // absent value: no-op
        assert_eq!(b.replace_operand(phi, x, y), 0);

        b.clear_operands(phi);
        assert_eq!(b.fct().value(y).use_count(), 0);
        assert_eq!(b.fct().inst(phi).operand_count(), 0);
    }

    #[test]
    fn set_operand_out_of_range_is_reported() {
        let (mut fct, _block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let phi = b.phi(vec![x], "p");

        assert_eq!(
            b.set_operand(phi, 3, x),
            Err(IrError::OperandIndexOutOfBounds { index: 3, len: 1 })
        );
    }

    #[test]
    fn replace_all_uses_transfers_every_slot() {
        let (mut fct, _block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let y = b.const_int(2, "y");
        let p1 = b.phi(vec![x, x], "p1");
        let p2 = b.phi(vec![x], "p2");

        b.replace_all_uses_with(x, y);

        assert_eq!(b.fct().value(x).use_count(), 0);
        assert_eq!(b.fct().value(y).use_count(), 3);
        assert_eq!(b.fct().inst(p1).operands(), &[y, y]);
        assert_eq!(b.fct().inst(p2).operands(), &[y]);

        // replacing a value with itself is a no-op
        b.replace_all_uses_with(y, y);
        assert_eq!(b.fct().value(y).use_count(), 3);
    }

    #[test]
    fn remove_inst_only_changes_membership() {
        let (mut fct, block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let i1 = b.phi(vec![x], "i1");
        let i2 = b.phi(vec![x], "i2");
        let i3 = b.phi(vec![x], "i3");
        b.push_back(block, i1);
        b.push_back(block, i2);
        b.push_back(block, i3);

        b.remove_inst(block, i2);

        assert_eq!(fct.block(block).code(), &[i1, i3]);
        assert_eq!(fct.inst(i2).block(), None);
        assert_eq!(fct.inst(i2).operands(), &[x]);
        assert_eq!(fct.value(x).use_count(), 3);
    }

    #[test]
    #[should_panic(expected = "instruction already owned by a block")]
    fn push_back_rejects_owned_instruction() {
        let (mut fct, block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let other = b.add_block("other");
        let i = b.ret(None);
        b.push_back(block, i);
        b.push_back(other, i);
    }

    #[test]
    fn replace_inst_swaps_position_without_rewriting_uses() {
        let (mut fct, block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let old = b.phi(vec![x], "old");
        let tail = b.ret(None);
        b.push_back(block, old);
        b.push_back(block, tail);

        let user = b.phi(vec![old.value()], "user");

        let new = b.phi(vec![x], "new");
        b.replace_inst(old, new);

        assert_eq!(fct.block(block).code(), &[new, tail]);
        assert_eq!(fct.inst(old).block(), None);
        assert_eq!(fct.inst(new).block(), Some(block));
        // the positional swap left uses of `old` alone
        assert_eq!(fct.inst(user).operands(), &[old.value()]);
        assert_eq!(fct.value(old.value()).use_count(), 1);
    }

    #[test]
    fn merge_back_moves_code_and_relinks_edges() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);

        let a = b.add_block("a");
        let bb = b.add_block("b");
        let c = b.add_block("c");
        b.set_entry(a);

        let label = b.label("work");
        let i1 = b.call(label, Vec::new(), LiteralType::Void, "i1");
        let i2 = b.call(label, Vec::new(), LiteralType::Void, "i2");
        let i3 = b.call(label, Vec::new(), LiteralType::Void, "i3");
        b.push_back(a, i1);
        b.push_back(a, i2);
        b.push_back(bb, i3);

        b.link_successor(a, c);
        b.link_successor(bb, c);

        b.merge_back(a, bb);

        assert_eq!(fct.block(a).code(), &[i1, i2, i3]);
        assert_eq!(fct.inst(i3).block(), Some(a));
        assert!(fct.block(bb).is_empty());
        assert_eq!(fct.block(a).successors(), &[c]);
        assert_eq!(fct.block(c).predecessors(), &[a]);
        assert!(fct.block(bb).successors().is_empty());
        assert!(fct.block(bb).predecessors().is_empty());

        fct.verify();
    }

    #[test]
    fn merge_back_detaches_merged_blocks_own_predecessors() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);

        let a = b.add_block("a");
        let bb = b.add_block("b");
        let c = b.add_block("c");
        b.set_entry(a);

        b.link_successor(a, bb);
        b.link_successor(bb, c);

        b.merge_back(a, bb);

        assert_eq!(fct.block(a).successors(), &[c]);
        assert_eq!(fct.block(c).predecessors(), &[a]);
        assert!(fct.block(bb).predecessors().is_empty());

        fct.verify();
    }

    #[test]
    fn link_unlink_keep_adjacency_symmetric() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);

        let a = b.add_block("a");
        let c = b.add_block("c");

        b.link_successor(a, c);
        assert_eq!(fct.block(a).successors(), &[c]);
        assert_eq!(fct.block(c).predecessors(), &[a]);

        let mut b = IrBuilder::new(&mut fct);
        b.unlink_successor(a, c);
        assert!(fct.block(a).successors().is_empty());
        assert!(fct.block(c).predecessors().is_empty());
    }

    #[test]
    fn move_after_and_before_only_touch_layout() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);

        let b0 = b.add_block("b0");
        let b1 = b.add_block("b1");
        let b2 = b.add_block("b2");
        b.link_successor(b0, b1);

        b.move_after(b0, b2);
        assert_eq!(b.fct().block_order(), &[b1, b2, b0]);

        b.move_before(b0, b1);
        assert_eq!(b.fct().block_order(), &[b0, b1, b2]);

        // CFG untouched by layout moves
        assert_eq!(fct.block(b0).successors(), &[b1]);
        assert_eq!(fct.block(b1).predecessors(), &[b0]);
    }

    #[test]
    fn clone_shares_operands() {
        let (mut fct, _block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let orig = b.phi(vec![x], "p");
        let copy = b.clone_inst(orig);

        assert_ne!(orig, copy);
        assert_eq!(fct.inst(copy).block(), None);
        assert_eq!(fct.inst(copy).operands(), fct.inst(orig).operands());
        assert_eq!(fct.value(x).use_count(), 2);
    }

    #[test]
    fn resolve_label_rewrites_all_referencing_calls() {
        let mut defs = DefTable::new();
        let helper = defs.add_function(FunctionDefinition {
            name: "helper".into(),
            no_return: false,
        });

        let (mut fct, block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let label = b.label("helper");
        let call1 = b.call(label, Vec::new(), LiteralType::Void, "");
        let call2 = b.call(label, Vec::new(), LiteralType::Void, "");
        b.push_back(block, call1);
        b.push_back(block, call2);

        let resolved = b.fct_def(helper, "helper");
        b.resolve_label(label, resolved);

        assert_eq!(*fct.callee(call1), DefRef::Fct(helper));
        assert_eq!(*fct.callee(call2), DefRef::Fct(helper));
        assert_eq!(fct.value(label).use_count(), 0);
    }

    #[test]
    fn free_value_marks_slot_removed() {
        let (mut fct, block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let i = b.phi(vec![x], "p");
        b.push_back(block, i);

        b.remove_inst(block, i);
        b.free_value(i.value());

        assert_eq!(fct.value(x).use_count(), 0);
        match fct.value(i.value()).kind() {
            ValueKind::Removed => {}
            _ => panic!("slot not marked removed"),
        }
    }

    #[test]
    #[should_panic(expected = "freeing value with remaining uses")]
    fn free_value_rejects_dangling_uses() {
        let (mut fct, _block) = fct_with_block();
        let mut b = IrBuilder::new(&mut fct);

        let x = b.const_int(1, "x");
        let _user = b.phi(vec![x], "p");
        b.free_value(x);
    }
}

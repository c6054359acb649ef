//! Deterministic textual dump of a function, for debugging and tests.

use crate::def::DefTable;
use crate::function::Function;
use crate::value::{ConstKind, DefRef, InstId, ValueId, ValueKind};
use crate::visit::InstVisitor;

pub fn dump_fct(fct: &Function, defs: &DefTable) -> String {
    let mut dumper = Dumper {
        defs,
        out: String::new(),
    };

    dumper.out.push_str(&format!("fn {}:\n", fct.name()));

    for &block in fct.block_order() {
        let data = fct.block(block);

        dumper
            .out
            .push_str(&format!("block {}:", fct.value(block.value()).name()));

        if !data.predecessors().is_empty() {
            dumper.out.push_str(" preds [");
            for (i, &p) in data.predecessors().iter().enumerate() {
                if i > 0 {
                    dumper.out.push_str(", ");
                }
                dumper.out.push_str(fct.value(p.value()).name());
            }
            dumper.out.push_str("]");
        }

        dumper.out.push_str("\n");

        for &inst in data.code() {
            dumper.out.push_str("  ");
            fct.accept(inst, &mut dumper);
            dumper.out.push_str("\n");
        }
    }

    dumper.out
}

struct Dumper<'a> {
    defs: &'a DefTable,
    out: String,
}

impl<'a> Dumper<'a> {
    fn operand_str(&self, fct: &Function, value: ValueId) -> String {
        match fct.value(value).kind() {
            ValueKind::Const(ConstKind::Int(v)) => format!("{}", v),
            ValueKind::Const(ConstKind::UInt(v)) => format!("{}u", v),
            ValueKind::Const(ConstKind::Str(s)) => format!("{:?}", s),
            ValueKind::Def(DefRef::Inst(id)) => self.defs.instruction(*id).mnemonic.clone(),
            ValueKind::Def(DefRef::Fct(id)) => format!("@{}", self.defs.function(*id).name),
            ValueKind::Def(DefRef::Label(name)) => format!("?{}", name),
            ValueKind::Inst(_) => format!("%{}", fct.value(value).name()),
            ValueKind::Block(_) => fct.value(value).name().to_string(),
            ValueKind::Removed => "<removed>".into(),
        }
    }

    fn push_result(&mut self, fct: &Function, inst: InstId) {
        let name = fct.value(inst.value()).name();
        if !name.is_empty() {
            self.out.push_str(&format!("%{} = ", name));
        }
    }

    fn push_args(&mut self, fct: &Function, args: &[ValueId]) {
        for (i, &arg) in args.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            let s = self.operand_str(fct, arg);
            self.out.push_str(&s);
        }
    }
}

impl<'a> InstVisitor for Dumper<'a> {
    fn visit_phi(&mut self, fct: &Function, inst: InstId) {
        self.push_result(fct, inst);
        self.out.push_str("phi [");
        let operands = fct.inst(inst).operands().to_vec();
        self.push_args(fct, &operands);
        self.out.push_str("]");
    }

    fn visit_cpu(&mut self, fct: &Function, inst: InstId) {
        self.push_result(fct, inst);
        let operands = fct.inst(inst).operands().to_vec();
        let mnemonic = self.operand_str(fct, operands[0]);
        self.out.push_str(&mnemonic);
        if operands.len() > 1 {
            self.out.push_str(" ");
            self.push_args(fct, &operands[1..]);
        }
    }

    fn visit_call(&mut self, fct: &Function, inst: InstId) {
        self.push_result(fct, inst);
        let operands = fct.inst(inst).operands().to_vec();
        let callee = self.operand_str(fct, operands[0]);
        self.out.push_str(&format!("call {}(", callee));
        self.push_args(fct, &operands[1..]);
        self.out.push_str(")");
    }

    fn visit_br(&mut self, fct: &Function, inst: InstId) {
        let target = fct.inst(inst).operands()[0];
        let s = self.operand_str(fct, target);
        self.out.push_str(&format!("br {}", s));
    }

    fn visit_cond_br(&mut self, fct: &Function, inst: InstId) {
        let operands = fct.inst(inst).operands().to_vec();
        let cond = self.operand_str(fct, operands[0]);
        let then_block = self.operand_str(fct, operands[1]);
        let else_block = self.operand_str(fct, operands[2]);
        self.out
            .push_str(&format!("condbr {}, {}, {}", cond, then_block, else_block));
    }

    fn visit_ret(&mut self, fct: &Function, inst: InstId) {
        self.out.push_str("ret");
        let operands = fct.inst(inst).operands().to_vec();
        if !operands.is_empty() {
            let s = self.operand_str(fct, operands[0]);
            self.out.push_str(&format!(" {}", s));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IrBuilder;
    use crate::def::{DefTable, FunctionDefinition, InstructionDefinition};
    use crate::ty::LiteralType;

    #[test]
    fn dump_renders_blocks_and_instructions() {
        let mut defs = DefTable::new();
        let mov = defs.add_instruction(InstructionDefinition {
            mnemonic: "mov".into(),
            operand_count: 2,
            no_return: false,
        });
        let helper = defs.add_function(FunctionDefinition {
            name: "helper".into(),
            no_return: false,
        });

        let mut fct = Function::new("main");
        let mut b = IrBuilder::new(&mut fct);
        let entry = b.add_block("entry");
        let body = b.add_block("body");
        b.set_entry(entry);
        b.link_successor(entry, body);

        let forty_two = b.const_int(42, "");
        let mov_def = b.inst_def(mov, "mov");
        let t0 = b.cpu(mov_def, vec![forty_two], LiteralType::Int, "t0");
        let br = b.br(body);
        b.push_back(entry, t0);
        b.push_back(entry, br);

        let callee = b.fct_def(helper, "helper");
        let call = b.call(callee, vec![t0.value()], LiteralType::Void, "r");
        let ret = b.ret(Some(t0.value()));
        b.push_back(body, call);
        b.push_back(body, ret);

        let expected = "\
fn main:
block entry:
  %t0 = mov 42
  br body
block body: preds [entry]
  %r = call @helper(%t0)
  ret %t0
";

        assert_eq!(dump_fct(&fct, &defs), expected);
    }

    #[test]
    fn dump_renders_phi_and_unresolved_call() {
        let defs = DefTable::new();

        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);
        let entry = b.add_block("entry");
        b.set_entry(entry);

        let x = b.const_int(1, "");
        let y = b.const_uint(2, "");
        let phi = b.phi(vec![x, y], "p");
        let label = b.label("ext");
        let call = b.call(label, Vec::new(), LiteralType::Void, "");
        b.push_back(entry, phi);
        b.push_back(entry, call);

        let expected = "\
fn f:
block entry:
  %p = phi [1, 2u]
  call ?ext()
";

        assert_eq!(dump_fct(&fct, &defs), expected);
    }
}

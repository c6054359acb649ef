//! Boundary to the external instruction/register definition database.
//!
//! The IR only needs stable handles for resolved callees plus the
//! "does this call return" predicate; everything else about opcode legality
//! and operand shapes is owned elsewhere.

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct InstDefId(pub usize);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FctDefId(pub usize);

/// Definition of one machine instruction (mnemonic plus shape summary).
pub struct InstructionDefinition {
    pub mnemonic: String,
    pub operand_count: usize,
    pub no_return: bool,
}

/// Definition of a user-defined function a call can resolve to.
pub struct FunctionDefinition {
    pub name: String,
    pub no_return: bool,
}

/// Table of definitions the IR consults through narrow accessors.
pub struct DefTable {
    insts: Vec<InstructionDefinition>,
    fcts: Vec<FunctionDefinition>,
}

impl DefTable {
    pub fn new() -> DefTable {
        DefTable {
            insts: Vec::new(),
            fcts: Vec::new(),
        }
    }

    pub fn add_instruction(&mut self, def: InstructionDefinition) -> InstDefId {
        self.insts.push(def);
        InstDefId(self.insts.len() - 1)
    }

    pub fn add_function(&mut self, def: FunctionDefinition) -> FctDefId {
        self.fcts.push(def);
        FctDefId(self.fcts.len() - 1)
    }

    pub fn instruction(&self, id: InstDefId) -> &InstructionDefinition {
        &self.insts[id.0]
    }

    pub fn function(&self, id: FctDefId) -> &FunctionDefinition {
        &self.fcts[id.0]
    }
}

impl Default for DefTable {
    fn default() -> DefTable {
        DefTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_roundtrip() {
        let mut defs = DefTable::new();
        let add = defs.add_instruction(InstructionDefinition {
            mnemonic: "add".into(),
            operand_count: 3,
            no_return: false,
        });
        let exit = defs.add_function(FunctionDefinition {
            name: "exit".into(),
            no_return: true,
        });

        assert_eq!(defs.instruction(add).mnemonic, "add");
        assert_eq!(defs.instruction(add).operand_count, 3);
        assert!(defs.function(exit).no_return);
    }
}

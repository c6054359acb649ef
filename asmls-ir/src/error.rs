use std::error::Error;
use std::fmt;

use crate::value::ValueId;

/// Expected, data-dependent failure conditions.
///
/// These arise from ordinary incremental construction (an index that is not
/// there yet, a handle of the wrong kind) and are reported to the caller.
/// Structural-invariant violations are not represented here; those are
/// programming errors and abort via `verify` or an assertion.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum IrError {
    OperandIndexOutOfBounds { index: usize, len: usize },
    NotAnInst(ValueId),
    NotABlock(ValueId),
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IrError::OperandIndexOutOfBounds { index, len } => {
                write!(f, "operand index {} out of bounds (len {})", index, len)
            }
            IrError::NotAnInst(id) => write!(f, "value {:?} is not an instruction", id),
            IrError::NotABlock(id) => write!(f, "value {:?} is not a basic block", id),
        }
    }
}

impl Error for IrError {}

//! SSA-flavored intermediate representation for assembly tooling.
//!
//! A `Function` owns an arena of values (constants, definition references,
//! instructions, basic blocks) addressed by stable ids; instructions hold
//! operand edges forward and every value keeps a use list backward. All
//! mutation goes through `IrBuilder`, which keeps operand lists, use lists
//! and the predecessor/successor adjacency consistent.

pub mod block;
pub mod builder;
pub mod def;
mod dom;
pub mod dump;
pub mod error;
pub mod function;
pub mod inst;
pub mod ty;
pub mod value;
pub mod visit;

pub use block::BlockData;
pub use builder::IrBuilder;
pub use def::{DefTable, FctDefId, FunctionDefinition, InstDefId, InstructionDefinition};
pub use dump::dump_fct;
pub use error::IrError;
pub use function::Function;
pub use inst::{InstData, InstKind};
pub use ty::LiteralType;
pub use value::{BlockId, ConstKind, DefRef, InstId, ValueData, ValueId, ValueKind};
pub use visit::InstVisitor;

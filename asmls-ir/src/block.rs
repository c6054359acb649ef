use crate::value::{BlockId, InstId};

/// Basic-block payload: the owned instruction sequence plus the CFG
/// adjacency lists.
///
/// The sequence strictly owns its instructions: an instruction is in at most
/// one block at a time and its back-reference always agrees with the
/// sequence. `predecessors`/`successors` are kept symmetric as a pair; both
/// sides of an edge are always updated in the same builder call.
pub struct BlockData {
    pub(crate) code: Vec<InstId>,
    pub(crate) predecessors: Vec<BlockId>,
    pub(crate) successors: Vec<BlockId>,
}

impl BlockData {
    pub(crate) fn new() -> BlockData {
        BlockData {
            code: Vec::new(),
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    pub fn code(&self) -> &[InstId] {
        &self.code
    }

    pub fn inst(&self, index: usize) -> Option<InstId> {
        self.code.get(index).copied()
    }

    pub fn first(&self) -> Option<InstId> {
        self.code.first().copied()
    }

    pub fn last(&self) -> Option<InstId> {
        self.code.last().copied()
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn predecessors(&self) -> &[BlockId] {
        &self.predecessors
    }

    pub fn successors(&self) -> &[BlockId] {
        &self.successors
    }
}

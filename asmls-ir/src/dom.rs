//! On-demand CFG dominance.
//!
//! Block graphs mutate frequently during construction, so dominator
//! information is recomputed per query instead of being maintained
//! incrementally: reverse postorder from the entry block, then the
//! Cooper-Harvey-Kennedy fixed point for immediate dominators.

use std::collections::HashMap;

use fixedbitset::FixedBitSet;

use crate::function::Function;
use crate::value::BlockId;

struct Dominance {
    /// Immediate dominator per reachable non-entry block.
    idom: HashMap<BlockId, BlockId>,
}

pub(crate) fn dominators(fct: &Function, block: BlockId) -> Vec<BlockId> {
    let dom = compute(fct);
    let mut result = Vec::new();
    let mut current = block;

    while let Some(&d) = dom.idom.get(&current) {
        result.push(d);
        current = d;
    }

    result
}

pub(crate) fn immediate_dominator(fct: &Function, block: BlockId) -> Option<BlockId> {
    compute(fct).idom.get(&block).copied()
}

fn compute(fct: &Function) -> Dominance {
    let entry = match fct.entry_block() {
        Some(entry) => entry,
        None => return Dominance { idom: HashMap::new() },
    };

    let mut rpo = postorder(fct, entry);
    rpo.reverse();

    let mut rpo_index = HashMap::new();
    for (i, &b) in rpo.iter().enumerate() {
        rpo_index.insert(b, i);
    }

    // idom by rpo index; the entry block dominates itself.
    let mut idom: Vec<Option<usize>> = vec![None; rpo.len()];
    idom[0] = Some(0);

    let mut changed = true;
    while changed {
        changed = false;

        for i in 1..rpo.len() {
            let mut new_idom: Option<usize> = None;

            for &p in fct.block(rpo[i]).predecessors() {
                let pi = match rpo_index.get(&p) {
                    Some(&pi) => pi,
                    // Predecessor unreachable from entry: ignore.
                    None => continue,
                };

                if idom[pi].is_none() {
                    continue;
                }

                new_idom = Some(match new_idom {
                    Some(current) => intersect(&idom, current, pi),
                    None => pi,
                });
            }

            if let Some(ni) = new_idom {
                if idom[i] != Some(ni) {
                    idom[i] = Some(ni);
                    changed = true;
                }
            }
        }
    }

    let mut map = HashMap::new();
    for i in 1..rpo.len() {
        let d = idom[i].expect("reachable block without idom");
        map.insert(rpo[i], rpo[d]);
    }

    Dominance { idom: map }
}

fn intersect(idom: &[Option<usize>], a: usize, b: usize) -> usize {
    let mut a = a;
    let mut b = b;

    while a != b {
        while a > b {
            a = idom[a].expect("idom missing during intersect");
        }
        while b > a {
            b = idom[b].expect("idom missing during intersect");
        }
    }

    a
}

fn postorder(fct: &Function, entry: BlockId) -> Vec<BlockId> {
    let mut visited = FixedBitSet::with_capacity(fct.value_count());
    let mut out = Vec::new();
    let mut stack: Vec<(BlockId, usize)> = vec![(entry, 0)];
    visited.insert(entry.value().index());

    loop {
        let (block, next) = match stack.last_mut() {
            Some(frame) => {
                let next = frame.1;
                frame.1 += 1;
                (frame.0, next)
            }
            None => break,
        };

        let successors = fct.block(block).successors();

        if next < successors.len() {
            let s = successors[next];
            if !visited.contains(s.value().index()) {
                visited.insert(s.value().index());
                stack.push((s, 0));
            }
        } else {
            out.push(block);
            stack.pop();
        }
    }

    out
}

/// Bitset of arena slots reachable from `entry` along successor edges.
pub(crate) fn reachable(fct: &Function, entry: BlockId) -> FixedBitSet {
    let mut visited = FixedBitSet::with_capacity(fct.value_count());
    let mut stack = vec![entry];
    visited.insert(entry.value().index());

    while let Some(b) = stack.pop() {
        for &s in fct.block(b).successors() {
            if !visited.contains(s.value().index()) {
                visited.insert(s.value().index());
                stack.push(s);
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use crate::builder::IrBuilder;
    use crate::function::Function;
    use crate::value::BlockId;

    fn diamond() -> (Function, BlockId, BlockId, BlockId, BlockId) {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);
        let entry = b.add_block("entry");
        let left = b.add_block("left");
        let right = b.add_block("right");
        let join = b.add_block("join");
        b.set_entry(entry);

        b.link_successor(entry, left);
        b.link_successor(entry, right);
        b.link_successor(left, join);
        b.link_successor(right, join);

        (fct, entry, left, right, join)
    }

    #[test]
    fn diamond_dominators() {
        let (fct, entry, left, right, join) = diamond();

        assert_eq!(fct.dominators(entry), vec![]);
        assert_eq!(fct.dominators(left), vec![entry]);
        assert_eq!(fct.dominators(right), vec![entry]);
        assert_eq!(fct.dominators(join), vec![entry]);
    }

    #[test]
    fn diamond_immediate_dominators() {
        let (fct, entry, left, _right, join) = diamond();

        assert_eq!(fct.immediate_dominator(entry), None);
        assert_eq!(fct.immediate_dominator(left), Some(entry));
        assert_eq!(fct.immediate_dominator(join), Some(entry));
    }

    #[test]
    fn chain_dominators_are_ordered_inside_out() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);
        let entry = b.add_block("entry");
        let mid = b.add_block("mid");
        let tail = b.add_block("tail");
        b.set_entry(entry);
        b.link_successor(entry, mid);
        b.link_successor(mid, tail);

        assert_eq!(fct.dominators(tail), vec![mid, entry]);
        assert_eq!(fct.immediate_dominator(tail), Some(mid));
    }

    #[test]
    fn unreachable_block_has_no_dominators() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);
        let entry = b.add_block("entry");
        let island = b.add_block("island");
        b.set_entry(entry);

        assert_eq!(fct.dominators(island), vec![]);
        assert_eq!(fct.immediate_dominator(island), None);
    }

    #[test]
    fn loop_back_edge_does_not_confuse_idoms() {
        let mut fct = Function::new("f");
        let mut b = IrBuilder::new(&mut fct);
        let entry = b.add_block("entry");
        let head = b.add_block("head");
        let body = b.add_block("body");
        let exit = b.add_block("exit");
        b.set_entry(entry);
        b.link_successor(entry, head);
        b.link_successor(head, body);
        b.link_successor(body, head);
        b.link_successor(head, exit);

        assert_eq!(fct.immediate_dominator(body), Some(head));
        assert_eq!(fct.immediate_dominator(exit), Some(head));
        assert_eq!(fct.dominators(exit), vec![head, entry]);
    }
}

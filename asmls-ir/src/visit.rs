use crate::function::Function;
use crate::value::InstId;

/// Double-dispatch interface over the closed set of instruction kinds.
///
/// Printers, analyses and code generators implement this instead of
/// matching on instruction internals. Adding a new instruction kind means
/// adding a handler to every visitor; that trade-off (exhaustive dispatch
/// over open extensibility) is deliberate.
///
/// Dispatch happens through [`Function::accept`].
pub trait InstVisitor {
    fn visit_phi(&mut self, fct: &Function, inst: InstId);
    fn visit_cpu(&mut self, fct: &Function, inst: InstId);
    fn visit_call(&mut self, fct: &Function, inst: InstId);
    fn visit_br(&mut self, fct: &Function, inst: InstId);
    fn visit_cond_br(&mut self, fct: &Function, inst: InstId);
    fn visit_ret(&mut self, fct: &Function, inst: InstId);
}

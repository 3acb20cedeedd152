//! Depth-first walks over upstream call trees.
//!
//! Upstream `cyclic`/`depth_limited` flags stop descent, and so does a per-root
//! visited set: call data comes from another subsystem and may contain cycles
//! nobody flagged.

use crate::types::Truncation;
use std::collections::HashSet;
use symgraph_protocol::{IncomingCaller, OutgoingCall, SymbolKey};

/// One call reached during an outgoing walk
pub(crate) struct CallStep<'t, 'p> {
    pub call: &'t OutgoingCall,
    /// Key of the symbol making the call
    pub caller: &'p SymbolKey,
    /// 1 for the root's direct calls
    pub depth: usize,
    /// The callee already sits on the path from the root to this call
    pub closes_cycle: bool,
}

impl CallStep<'_, '_> {
    pub fn truncation(&self) -> Option<Truncation> {
        Truncation::from_flags(
            self.call.cyclic || self.closes_cycle,
            self.call.depth_limited,
        )
    }
}

/// Visit every call of `root`'s outgoing tree in pre-order.
pub(crate) fn walk_outgoing<'t>(
    root: &SymbolKey,
    calls: &'t [OutgoingCall],
    visit: &mut dyn FnMut(&CallStep<'t, '_>),
) {
    let mut visited = HashSet::from([root.clone()]);
    let mut path = vec![root.clone()];
    descend_outgoing(calls, 1, &mut visited, &mut path, visit);
}

fn descend_outgoing<'t>(
    calls: &'t [OutgoingCall],
    depth: usize,
    visited: &mut HashSet<SymbolKey>,
    path: &mut Vec<SymbolKey>,
    visit: &mut dyn FnMut(&CallStep<'t, '_>),
) {
    for call in calls {
        let key = call.target.key();
        if let Some(caller) = path.last() {
            visit(&CallStep {
                call,
                caller,
                depth,
                closes_cycle: path.contains(&key),
            });
        }
        if !call.is_expandable() || !visited.insert(key.clone()) {
            continue;
        }
        path.push(key);
        descend_outgoing(&call.outgoing_calls, depth + 1, visited, path, visit);
        path.pop();
    }
}

/// Visit every caller of `root`'s incoming tree in pre-order.
pub(crate) fn walk_incoming<'t>(
    root: &SymbolKey,
    callers: &'t [IncomingCaller],
    visit: &mut dyn FnMut(&'t IncomingCaller),
) {
    let mut visited = HashSet::from([root.clone()]);
    descend_incoming(callers, &mut visited, visit);
}

fn descend_incoming<'t>(
    callers: &'t [IncomingCaller],
    visited: &mut HashSet<SymbolKey>,
    visit: &mut dyn FnMut(&'t IncomingCaller),
) {
    for caller in callers {
        visit(caller);
        if !caller.is_expandable() || !visited.insert(caller.source.key()) {
            continue;
        }
        descend_incoming(&caller.incoming_callers, visited, visit);
    }
}

/// Whether `target` appears anywhere in `root`'s outgoing tree
pub(crate) fn reaches(root: &SymbolKey, calls: &[OutgoingCall], target: &SymbolKey) -> bool {
    let mut found = false;
    walk_outgoing(root, calls, &mut |step| {
        if !found && step.call.target.key() == *target {
            found = true;
        }
    });
    found
}

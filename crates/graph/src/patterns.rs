use crate::topology::Topology;
use crate::traverse::{reaches, walk_incoming, walk_outgoing};
use crate::types::{
    DiamondDirection, DiamondPattern, GraphResultEntry, HubPattern, Pattern, SharedDepPattern,
    SharedTypePattern,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use symgraph_protocol::{SymbolKey, TypeRef};

/// Detect structural patterns across a result set.
///
/// Output order is stable: hubs, shared dependencies, shared types, diamonds,
/// each in result/topology order.
pub fn detect_patterns(results: &[GraphResultEntry], topology: &Topology) -> Vec<Pattern> {
    let detector = PatternDetector::new(results);

    let mut patterns: Vec<Pattern> = Vec::new();
    patterns.extend(detector.hubs().into_iter().map(Pattern::Hub));
    patterns.extend(
        shared_dependencies(topology)
            .into_iter()
            .map(Pattern::SharedDependency),
    );
    patterns.extend(detector.shared_types().into_iter().map(Pattern::SharedType));
    patterns.extend(detector.diamonds().into_iter().map(Pattern::Diamond));

    log::debug!("Detected {} patterns over {} results", patterns.len(), results.len());
    patterns
}

struct PatternDetector<'a> {
    results: &'a [GraphResultEntry],
    /// Result key -> 1-based index (first occurrence wins)
    result_index: HashMap<SymbolKey, usize>,
}

impl<'a> PatternDetector<'a> {
    fn new(results: &'a [GraphResultEntry]) -> Self {
        let mut result_index = HashMap::new();
        for (pos, entry) in results.iter().enumerate() {
            result_index.entry(entry.key()).or_insert(pos + 1);
        }
        Self {
            results,
            result_index,
        }
    }

    /// 1-based index of the first result carrying `entry`'s key
    fn canonical(&self, entry: &GraphResultEntry) -> usize {
        self.result_index.get(&entry.key()).copied().unwrap_or_default()
    }

    /// Results with a key seen earlier are folded into the first one.
    fn distinct_results(&self) -> impl Iterator<Item = (usize, &'a GraphResultEntry)> + '_ {
        self.results
            .iter()
            .enumerate()
            .map(|(pos, entry)| (pos + 1, entry))
            .filter(|&(index, entry)| self.canonical(entry) == index)
    }

    fn hubs(&self) -> Vec<HubPattern> {
        let mut hubs = Vec::new();
        for (index, entry) in self.distinct_results() {
            let key = entry.key();
            let mut callers = BTreeSet::new();

            walk_incoming(&key, &entry.metadata.incoming_callers, &mut |caller| {
                if let Some(&caller_index) = self.result_index.get(&caller.source.key()) {
                    if caller_index != index {
                        callers.insert(caller_index);
                    }
                }
            });

            for other in self.results {
                let other_index = self.canonical(other);
                if other_index == index {
                    continue;
                }
                if reaches(&other.key(), &other.metadata.outgoing_calls, &key) {
                    callers.insert(other_index);
                }
            }

            if callers.len() >= 2 {
                hubs.push(HubPattern {
                    result_index: index,
                    name: entry.name().to_string(),
                    called_by: callers.into_iter().collect(),
                });
            }
        }
        hubs
    }

    fn shared_types(&self) -> Vec<SharedTypePattern> {
        let mut order: Vec<&TypeRef> = Vec::new();
        let mut counts: HashMap<&TypeRef, usize> = HashMap::new();

        for entry in self.results {
            let Some(flows) = &entry.metadata.type_flows else {
                continue;
            };
            let mut seen = HashSet::new();
            for type_ref in &flows.referenced_types {
                if !seen.insert(type_ref) {
                    continue;
                }
                let count = counts.entry(type_ref).or_insert_with(|| {
                    order.push(type_ref);
                    0
                });
                *count += 1;
            }
        }

        order
            .into_iter()
            .filter_map(|type_ref| {
                let usage_count = counts.get(type_ref).copied().unwrap_or_default();
                (usage_count >= 2).then(|| SharedTypePattern {
                    name: type_ref.name.clone(),
                    file_path: type_ref.file_path.clone(),
                    usage_count,
                    total_results: self.results.len(),
                })
            })
            .collect()
    }

    fn diamonds(&self) -> Vec<DiamondPattern> {
        let mut callees: Vec<(usize, BTreeSet<SymbolKey>)> = Vec::new();
        let mut callers: Vec<(usize, BTreeSet<SymbolKey>)> = Vec::new();
        for entry in self.results {
            let index = self.canonical(entry);
            let key = entry.key();

            let mut reached = BTreeSet::new();
            walk_outgoing(&key, &entry.metadata.outgoing_calls, &mut |step| {
                reached.insert(step.call.target.key());
            });
            merge_into(&mut callees, index, reached);

            let mut reached_from = BTreeSet::new();
            walk_incoming(&key, &entry.metadata.incoming_callers, &mut |caller| {
                reached_from.insert(caller.source.key());
            });
            merge_into(&mut callers, index, reached_from);
        }

        let mut diamonds = converging_pairs(&callees, DiamondDirection::Callees);
        diamonds.extend(converging_pairs(&callers, DiamondDirection::Callers));
        diamonds
    }
}

fn merge_into(
    sets: &mut Vec<(usize, BTreeSet<SymbolKey>)>,
    index: usize,
    keys: BTreeSet<SymbolKey>,
) {
    match sets.iter_mut().find(|(existing, _)| *existing == index) {
        Some((_, set)) => set.extend(keys),
        None => sets.push((index, keys)),
    }
}

/// One diamond per symbol shared by an unordered pair of reach sets.
/// Each set belongs to a distinct result key, so a pair never pairs a symbol
/// with itself.
fn converging_pairs(
    sets: &[(usize, BTreeSet<SymbolKey>)],
    direction: DiamondDirection,
) -> Vec<DiamondPattern> {
    let mut seen: HashSet<(usize, usize, &SymbolKey)> = HashSet::new();
    let mut diamonds = Vec::new();
    for (pos, (i, left)) in sets.iter().enumerate() {
        for (j, right) in sets.iter().skip(pos + 1) {
            for shared in left.intersection(right) {
                if !seen.insert((*i, *j, shared)) {
                    continue;
                }
                diamonds.push(DiamondPattern {
                    results: (*i, *j),
                    shared_symbol: shared.clone(),
                    direction,
                });
            }
        }
    }
    diamonds
}

fn shared_dependencies(topology: &Topology) -> Vec<SharedDepPattern> {
    topology
        .nodes()
        .filter(|node| node.is_shared_dep())
        .map(|node| SharedDepPattern {
            name: node.name.clone(),
            file_path: node.file_path.clone(),
            used_by: topology.roots_reaching(&node.key()).into_iter().collect(),
        })
        .collect()
}

//! The followpos (Berry–Sethi) construction: a regular expression is compiled to a
//! DFA without building an NFA first. The expression is augmented to `(E)·#` with an
//! end-marker position, nullable/firstpos/lastpos are folded bottom-up over the tree,
//! followpos is accumulated per position, and DFA states are sets of positions.

use crate::dfa::{Dfa, DfaState};
use crate::regex::RegexAst;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

/// Position table filled during the bottom-up pass. Positions are 1-based, in
/// left-to-right leaf order, with the end marker assigned last (and highest).
#[derive(Debug, Default)]
struct Positions {
    symbols: Vec<char>,
    follow: Vec<BTreeSet<usize>>,
}

impl Positions {
    fn assign(&mut self, symbol: char) -> usize {
        self.symbols.push(symbol);
        self.follow.push(BTreeSet::new());
        self.symbols.len()
    }

    fn symbol(&self, position: usize) -> char {
        self.symbols[position - 1]
    }

    fn extend_follow(&mut self, position: usize, positions: &BTreeSet<usize>) {
        self.follow[position - 1].extend(positions.iter().copied());
    }

    fn follow(&self, position: usize) -> &BTreeSet<usize> {
        &self.follow[position - 1]
    }
}

/// nullable/firstpos/lastpos of one subtree.
struct NodeSets {
    nullable: bool,
    firstpos: BTreeSet<usize>,
    lastpos: BTreeSet<usize>,
}

/// One structural recursion computes all three sets and fills the followpos table
/// on the way up (followpos only ever grows from `Concat`, `Star` and `Plus` nodes).
fn analyze(ast: &RegexAst, positions: &mut Positions) -> NodeSets {
    match ast {
        RegexAst::Symbol(c) => {
            let p = positions.assign(*c);
            NodeSets {
                nullable: false,
                firstpos: BTreeSet::from([p]),
                lastpos: BTreeSet::from([p]),
            }
        }
        RegexAst::Concat(l, r) => {
            let left = analyze(l, positions);
            let right = analyze(r, positions);
            for &p in &left.lastpos {
                positions.extend_follow(p, &right.firstpos);
            }
            NodeSets {
                nullable: left.nullable && right.nullable,
                firstpos: if left.nullable {
                    left.firstpos.union(&right.firstpos).copied().collect()
                } else {
                    left.firstpos
                },
                lastpos: if right.nullable {
                    left.lastpos.union(&right.lastpos).copied().collect()
                } else {
                    right.lastpos
                },
            }
        }
        RegexAst::Alt(l, r) => {
            let left = analyze(l, positions);
            let right = analyze(r, positions);
            NodeSets {
                nullable: left.nullable || right.nullable,
                firstpos: left.firstpos.union(&right.firstpos).copied().collect(),
                lastpos: left.lastpos.union(&right.lastpos).copied().collect(),
            }
        }
        RegexAst::Star(c) | RegexAst::Plus(c) => {
            let child = analyze(c, positions);
            for &p in &child.lastpos {
                positions.extend_follow(p, &child.firstpos);
            }
            NodeSets {
                nullable: matches!(ast, RegexAst::Star(_)) || child.nullable,
                firstpos: child.firstpos,
                lastpos: child.lastpos,
            }
        }
        RegexAst::Opt(c) => {
            let child = analyze(c, positions);
            NodeSets {
                nullable: true,
                firstpos: child.firstpos,
                lastpos: child.lastpos,
            }
        }
    }
}

/// Builds the DFA for `ast`, with every accepting state tagged by `pattern`.
pub(crate) fn build_dfa(ast: &RegexAst, pattern: Rc<str>) -> Dfa {
    let mut positions = Positions::default();
    let root = analyze(ast, &mut positions);

    // Augment to (E)·#: the end marker follows every position that can end a match,
    // and a state accepts iff it contains the marker.
    let end = positions.assign('#');
    let marker = BTreeSet::from([end]);
    for &p in &root.lastpos {
        positions.extend_follow(p, &marker);
    }
    let mut initial = root.firstpos;
    if root.nullable {
        initial.insert(end);
    }

    let alphabet: Vec<char> = ast.alphabet().into_iter().collect();
    let char_idx: HashMap<char, usize> =
        alphabet.iter().enumerate().map(|(idx, &c)| (c, idx)).collect();

    let mut states = vec![DfaState {
        accepting: initial.contains(&end).then_some(0),
        transitions: vec![None; alphabet.len()],
    }];
    let initial_key: Vec<usize> = initial.into_iter().collect();
    let mut state_ids = HashMap::from([(initial_key.clone(), 0)]);
    let mut unmarked = vec![initial_key];

    while let Some(set) = unmarked.pop() {
        let id = state_ids[&set];

        // For each symbol occurring in this set, the target is the union of the
        // followpos of every position carrying that symbol.
        let mut moves: BTreeMap<char, BTreeSet<usize>> = BTreeMap::new();
        for &p in &set {
            if p == end {
                continue;
            }
            moves
                .entry(positions.symbol(p))
                .or_default()
                .extend(positions.follow(p).iter().copied());
        }

        for (symbol, targets) in moves {
            if targets.is_empty() {
                continue;
            }
            let accepting = targets.contains(&end);
            let key: Vec<usize> = targets.into_iter().collect();
            let next = match state_ids.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = states.len();
                    states.push(DfaState {
                        accepting: accepting.then_some(0),
                        transitions: vec![None; alphabet.len()],
                    });
                    state_ids.insert(key.clone(), fresh);
                    unmarked.push(key);
                    fresh
                }
            };
            states[id].transitions[char_idx[&symbol]] = Some(next);
        }
    }

    Dfa {
        alphabet: alphabet.into(),
        patterns: Rc::from(vec![pattern]),
        states,
        initial_state: 0,
    }
}

//! Action planning.
//!
//! Reliable classifiers form a model of the environment. A bidirectional
//! breadth-first search over that model looks for a sequence of actions
//! leading from the current perception to a goal. The forward direction
//! follows anticipations, the backward direction follows
//! [`Classifier::backwards_anticipation`]. The search stops as soon as both
//! directions reach a common perception.
use crate::{Acs2Config, Action, Classifier, Pattern, Perception, Population};
use log::trace;
use std::collections::HashMap;

/// Number of expansions in each direction before the search gives up.
pub const MAX_SEARCH_DEPTH: usize = 6;

/// Number of perceptions one direction may reach before the search gives up.
pub const MAX_SEARCH_STATES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn next(&self, cl: &Classifier, perception: &Perception) -> Option<Perception> {
        match self {
            Self::Forward => {
                if cl.condition.matches(perception) {
                    Some(cl.anticipation(perception))
                } else {
                    None
                }
            }
            Self::Backward => cl.backwards_anticipation(perception),
        }
    }
}

/// A perception reached by the search.
///
/// `link` holds the index of the node it was reached from and the action
/// connecting the two.
struct Node {
    perception: Perception,
    link: Option<(usize, Action)>,
}

/// Perceptions reached from one end of the search.
struct Frontier {
    direction: Direction,
    nodes: Vec<Node>,
    index: HashMap<Perception, usize>,
    expanded: usize,
}

impl Frontier {
    fn new(root: &Perception, direction: Direction) -> Self {
        Self {
            direction,
            nodes: vec![Node {
                perception: root.clone(),
                link: None,
            }],
            index: HashMap::from([(root.clone(), 0)]),
            expanded: 0,
        }
    }

    fn find(&self, perception: &Perception) -> Option<usize> {
        self.index.get(perception).copied()
    }

    fn push(&mut self, perception: Perception, parent: usize, action: Action) {
        self.index.insert(perception.clone(), self.nodes.len());
        self.nodes.push(Node {
            perception,
            link: Some((parent, action)),
        });
    }

    /// Actions connecting the root and node `idx`, in execution order.
    fn path(&self, mut idx: usize) -> Vec<Action> {
        let mut actions = vec![];
        while let Some((parent, action)) = self.nodes[idx].link {
            actions.push(action);
            idx = parent;
        }
        if self.direction == Direction::Forward {
            actions.reverse();
        }
        actions
    }
}

enum Expansion {
    Met(Vec<Action>),
    Growing,
    Stalled,
    Overflow,
}

/// Expands every node of `from` reached in the previous expansion.
fn expand(classifiers: &[&Classifier], from: &mut Frontier, to: &Frontier) -> Expansion {
    let end = from.nodes.len();

    for idx in from.expanded..end {
        let perception = from.nodes[idx].perception.clone();

        for cl in classifiers {
            let next = match from.direction.next(cl, &perception) {
                Some(next) => next,
                None => continue,
            };
            if from.find(&next).is_some() {
                continue;
            }

            if let Some(meet) = to.find(&next) {
                let (head, tail) = match from.direction {
                    Direction::Forward => (from.path(idx), to.path(meet)),
                    Direction::Backward => (to.path(meet), from.path(idx)),
                };
                let mut sequence = head;
                sequence.push(cl.action);
                sequence.extend(tail);
                return Expansion::Met(sequence);
            }

            from.push(next, idx, cl.action);
            if from.nodes.len() > MAX_SEARCH_STATES {
                return Expansion::Overflow;
            }
        }
    }

    from.expanded = end;
    if from.nodes.len() == end {
        Expansion::Stalled
    } else {
        Expansion::Growing
    }
}

/// Searches a sequence of actions leading from `start` to `goal`.
///
/// Only classifiers reliable under `cfg.theta_r` take part. Returns
/// `Ok(None)` if no sequence was found within [`MAX_SEARCH_DEPTH`]
/// expansions in each direction, and an empty sequence if `start` is the
/// goal.
pub fn search_goal_sequence(
    population: &Population,
    start: &Perception,
    goal: &Perception,
    cfg: &Acs2Config,
) -> crate::Result<Option<Vec<Action>>> {
    cfg.check_perception(start)?;
    cfg.check_perception(goal)?;

    if start == goal {
        return Ok(Some(vec![]));
    }

    let reliable = population.reliable(cfg.theta_r);
    let classifiers = population
        .members(&reliable)
        .map(|(_, cl)| cl)
        .collect::<Vec<_>>();
    if classifiers.is_empty() {
        return Ok(None);
    }

    let mut forward = Frontier::new(start, Direction::Forward);
    let mut backward = Frontier::new(goal, Direction::Backward);

    for depth in 0..MAX_SEARCH_DEPTH {
        let mut stalled = true;
        for direction in [Direction::Forward, Direction::Backward] {
            let expansion = match direction {
                Direction::Forward => expand(&classifiers, &mut forward, &backward),
                Direction::Backward => expand(&classifiers, &mut backward, &forward),
            };
            match expansion {
                Expansion::Met(sequence) => {
                    trace!("goal sequence {:?} found at depth {}", sequence, depth);
                    return Ok(Some(sequence));
                }
                Expansion::Overflow => return Ok(None),
                Expansion::Growing => stalled = false,
                Expansion::Stalled => {}
            }
        }
        if stalled {
            break;
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Effect};

    const LEFT: Action = 0;
    const RIGHT: Action = 1;

    fn cell(i: u32) -> String {
        char::from_digit(i, 36).map(String::from).unwrap()
    }

    fn reliable(condition: &str, action: Action, effect: &str) -> Classifier {
        Classifier::new(Condition::from(condition), action, Effect::from(effect)).quality(0.95)
    }

    /// Corridor model where `RIGHT` moves from cell `i` to `i + 1` for
    /// `i < length - 1`, and `LEFT` back if `with_left` is set.
    fn corridor(length: u32, with_left: bool) -> Population {
        let mut population = Population::new();
        for i in 0..length - 1 {
            population.insert(reliable(&cell(i), RIGHT, &cell(i + 1)));
            if with_left {
                population.insert(reliable(&cell(i + 1), LEFT, &cell(i)));
            }
        }
        population
    }

    fn search(population: &Population, start: u32, goal: u32) -> Option<Vec<Action>> {
        let cfg = Acs2Config::new(1, 2);
        search_goal_sequence(
            population,
            &Perception::from(cell(start).as_str()),
            &Perception::from(cell(goal).as_str()),
            &cfg,
        )
        .unwrap()
    }

    #[test]
    fn test_sequence_in_both_directions() {
        let population = corridor(4, true);
        assert_eq!(search(&population, 0, 3), Some(vec![RIGHT; 3]));
        assert_eq!(search(&population, 3, 0), Some(vec![LEFT; 3]));
        assert_eq!(search(&population, 1, 2), Some(vec![RIGHT]));
    }

    #[test]
    fn test_start_is_goal() {
        let population = corridor(4, true);
        assert_eq!(search(&population, 2, 2), Some(vec![]));
    }

    #[test]
    fn test_unreachable_goal() {
        let population = corridor(4, false);
        assert_eq!(search(&population, 3, 0), None);
    }

    #[test]
    fn test_unreliable_classifiers_are_ignored() {
        let mut population = Population::new();
        population.insert(reliable("0", RIGHT, "1").quality(0.5));
        assert_eq!(search(&population, 0, 1), None);

        population.insert(reliable("0", RIGHT, "1"));
        assert_eq!(search(&population, 0, 1), Some(vec![RIGHT]));
    }

    #[test]
    fn test_search_depth_is_bounded() {
        let population = corridor(14, false);
        assert_eq!(search(&population, 0, 12), Some(vec![RIGHT; 12]));
        assert_eq!(search(&population, 0, 13), None);
    }

    #[test]
    fn test_backward_search_uses_condition() {
        // the second attribute only changes with `RIGHT` if the first is 1
        let mut population = Population::new();
        population.insert(reliable("0#", LEFT, "1#"));
        population.insert(reliable("1#", LEFT, "0#"));
        population.insert(reliable("10", RIGHT, "#1"));

        let cfg = Acs2Config::new(2, 2);
        let sequence = search_goal_sequence(
            &population,
            &Perception::from("00"),
            &Perception::from("01"),
            &cfg,
        );
        assert_eq!(sequence, Ok(Some(vec![LEFT, RIGHT, LEFT])));
    }

    #[test]
    fn test_rejects_wrong_perception_length() {
        let population = corridor(4, true);
        let cfg = Acs2Config::new(1, 2);
        let result = search_goal_sequence(
            &population,
            &Perception::from("0"),
            &Perception::from("01"),
            &cfg,
        );
        assert!(result.is_err());
    }
}

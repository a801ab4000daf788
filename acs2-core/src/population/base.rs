//! Arena of classifiers.
use super::{ActionSet, ClassifierSet, MatchSet};
use crate::{Acs2Config, Action, Classifier, Pattern, Perception, RandomSource};
use log::trace;
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

/// Stable identifier of a classifier in a [`Population`].
///
/// Ids are never reused, so an id of a removed classifier simply resolves to
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassifierId(pub(crate) u64);

impl fmt::Display for ClassifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The classifiers of an agent.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    classifiers: BTreeMap<ClassifierId, Classifier>,
    next_id: u64,
}

impl Population {
    /// Constructs an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of macro-classifiers.
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    /// Returns `true` if the population is empty.
    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Number of micro-classifiers, the sum of numerosities.
    pub fn numerosity(&self) -> usize {
        self.classifiers.values().map(|cl| cl.num).sum()
    }

    /// Adds a classifier and returns its id.
    ///
    /// No check for similar classifiers is made, see
    /// [`Population::insert_with_subsumption_check`].
    pub fn insert(&mut self, cl: Classifier) -> ClassifierId {
        let id = ClassifierId(self.next_id);
        self.next_id += 1;
        trace!("insert {} {}", id, cl);
        self.classifiers.insert(id, cl);
        id
    }

    /// Adds a classifier after checking it against `cfg`, see
    /// [`Acs2Config::check_classifier`].
    pub fn insert_checked(
        &mut self,
        cl: Classifier,
        cfg: &Acs2Config,
    ) -> crate::Result<ClassifierId> {
        cfg.check_classifier(&cl)?;
        Ok(self.insert(cl))
    }

    /// Checks every classifier of a view against `cfg`.
    pub fn check_members(&self, set: &ClassifierSet, cfg: &Acs2Config) -> crate::Result<()> {
        self.members(set).try_for_each(|(_, cl)| cfg.check_classifier(cl))
    }

    /// Removes a classifier from the population only.
    pub fn remove(&mut self, id: ClassifierId) -> Option<Classifier> {
        self.classifiers.remove(&id)
    }

    /// Removes a classifier from the population, the action set and the
    /// match set.
    pub fn remove_everywhere(
        &mut self,
        id: ClassifierId,
        action_set: &mut ActionSet,
        match_set: Option<&mut MatchSet>,
    ) -> Option<Classifier> {
        action_set.remove(id);
        if let Some(match_set) = match_set {
            match_set.remove(id);
        }
        self.remove(id)
    }

    /// Returns the classifier with the given id.
    pub fn get(&self, id: ClassifierId) -> Option<&Classifier> {
        self.classifiers.get(&id)
    }

    /// Returns the classifier with the given id.
    pub fn get_mut(&mut self, id: ClassifierId) -> Option<&mut Classifier> {
        self.classifiers.get_mut(&id)
    }

    /// Returns an iterator over all classifiers.
    pub fn iter(&self) -> impl Iterator<Item = (ClassifierId, &Classifier)> + '_ {
        self.classifiers.iter().map(|(id, cl)| (*id, cl))
    }

    /// Returns an iterator over the classifiers of a view.
    ///
    /// Ids no longer in the population are skipped.
    pub fn members<'a>(
        &'a self,
        set: &'a ClassifierSet,
    ) -> impl Iterator<Item = (ClassifierId, &'a Classifier)> + 'a {
        set.iter()
            .filter_map(move |id| self.classifiers.get(&id).map(|cl| (id, cl)))
    }

    /// Forms the set of classifiers whose condition matches `perception`.
    pub fn form_match_set(&self, perception: &Perception) -> MatchSet {
        self.iter()
            .filter(|(_, cl)| cl.condition.matches(perception))
            .map(|(id, _)| id)
            .collect()
    }

    /// Forms the match set after checking the perception length.
    pub fn form_match_set_checked(
        &self,
        perception: &Perception,
        cfg: &Acs2Config,
    ) -> crate::Result<MatchSet> {
        cfg.check_perception(perception)?;
        Ok(self.form_match_set(perception))
    }

    /// Forms the subset of `match_set` advocating `action`.
    pub fn form_action_set(&self, match_set: &MatchSet, action: Action) -> ActionSet {
        self.members(match_set)
            .filter(|(_, cl)| cl.action == action)
            .map(|(id, _)| id)
            .collect()
    }

    /// The micro-classifier view of a set: each id repeated `num` times.
    pub fn expand(&self, set: &ClassifierSet) -> Vec<ClassifierId> {
        self.members(set)
            .flat_map(|(id, cl)| std::iter::repeat(id).take(cl.num))
            .collect()
    }

    /// Sum of numerosities of a set.
    pub fn set_numerosity(&self, set: &ClassifierSet) -> usize {
        self.members(set).map(|(_, cl)| cl.num).sum()
    }

    /// Highest fitness among the classifiers of `match_set` that anticipate
    /// a change.
    ///
    /// Returns zero if there is no such classifier.
    pub fn maximum_fitness(&self, match_set: &MatchSet) -> f64 {
        self.members(match_set)
            .filter(|(_, cl)| cl.does_anticipate_change())
            .map(|(_, cl)| cl.fitness())
            .fold(None, |acc: Option<f64>, f| Some(acc.map_or(f, |a| a.max(f))))
            .unwrap_or(0.0)
    }

    /// Returns `true` if a classifier with quality above `quality` predicts
    /// the transition `p0 -> p1` under `action`.
    pub fn exists_classifier(
        &self,
        p0: &Perception,
        action: Action,
        p1: &Perception,
        quality: f64,
    ) -> bool {
        self.classifiers
            .values()
            .any(|cl| cl.q > quality && cl.predicts_successfully(p0, action, p1))
    }

    /// Reliable classifiers.
    pub fn reliable(&self, theta_r: f64) -> ClassifierSet {
        self.iter()
            .filter(|(_, cl)| cl.is_reliable(theta_r))
            .map(|(id, _)| id)
            .collect()
    }

    /// Finds the most general classifier in `lists` subsuming `cl`.
    ///
    /// Ties among equally general subsumers are broken uniformly at random.
    pub fn find_subsumer<R: RandomSource + ?Sized>(
        &self,
        cl: &Classifier,
        lists: &[&ClassifierSet],
        cfg: &Acs2Config,
        rng: &mut R,
    ) -> Option<ClassifierId> {
        let mut most_general: Vec<ClassifierId> = vec![];
        let mut specificity = usize::MAX;

        for (id, other) in self.candidates(lists) {
            if !crate::subsumption::does_subsume(other, cl, cfg) {
                continue;
            }
            let s = other.condition.specificity();
            if s < specificity {
                specificity = s;
                most_general.clear();
                most_general.push(id);
            } else if s == specificity {
                most_general.push(id);
            }
        }

        match most_general.len() {
            0 => None,
            1 => Some(most_general[0]),
            n => Some(most_general[rng.below(n)]),
        }
    }

    /// Finds a classifier in `lists` with the condition, action and effect
    /// of `cl`.
    pub fn find_similar(&self, cl: &Classifier, lists: &[&ClassifierSet]) -> Option<ClassifierId> {
        self.candidates(lists)
            .find(|(_, other)| other.is_similar(cl))
            .map(|(id, _)| id)
    }

    /// Finds the classifier in `lists` that should take the place of `cl`.
    ///
    /// If `subsume` is set a subsumer is preferred, otherwise only a similar
    /// classifier is looked for.
    pub fn find_old_classifier<R: RandomSource + ?Sized>(
        &self,
        cl: &Classifier,
        lists: &[&ClassifierSet],
        subsume: bool,
        cfg: &Acs2Config,
        rng: &mut R,
    ) -> Option<ClassifierId> {
        if subsume {
            if let Some(id) = self.find_subsumer(cl, lists, cfg, rng) {
                return Some(id);
            }
        }
        self.find_similar(cl, lists)
    }

    fn candidates<'a>(
        &'a self,
        lists: &'a [&'a ClassifierSet],
    ) -> impl Iterator<Item = (ClassifierId, &'a Classifier)> + 'a {
        let mut seen = HashSet::new();
        lists
            .iter()
            .flat_map(|set| set.iter())
            .filter(move |&id| seen.insert(id))
            .filter_map(move |id| self.classifiers.get(&id).map(|cl| (id, cl)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Acs2Error, Condition, Effect, ScriptedRandom};

    fn classifier(condition: &str, action: Action, effect: &str) -> Classifier {
        Classifier::new(Condition::from(condition), action, Effect::from(effect))
    }

    #[test]
    fn test_match_set_and_action_set() {
        let mut population = Population::new();
        let a = population.insert(classifier("1###", 0, "####"));
        let b = population.insert(classifier("0###", 0, "####"));
        let c = population.insert(classifier("1#1#", 1, "0###"));
        let d = population.insert(classifier("####", 1, "####"));

        let match_set = population.form_match_set(&Perception::from("1010"));
        assert_eq!(match_set.as_slice(), &[a, c, d]);
        assert!(!match_set.contains(b));

        let action_set = population.form_action_set(&match_set, 1);
        assert_eq!(action_set.as_slice(), &[c, d]);
    }

    #[test]
    fn test_form_match_set_checked() {
        let population = Population::new();
        let cfg = Acs2Config::new(4, 2);
        assert!(population
            .form_match_set_checked(&Perception::from("10"), &cfg)
            .is_err());
        assert!(population
            .form_match_set_checked(&Perception::from("1010"), &cfg)
            .is_ok());
    }

    #[test]
    fn test_remove_everywhere() {
        let mut population = Population::new();
        let a = population.insert(classifier("1###", 0, "####"));
        let b = population.insert(classifier("####", 0, "####"));
        let mut match_set = population.form_match_set(&Perception::from("1000"));
        let mut action_set = population.form_action_set(&match_set, 0);

        assert!(population
            .remove_everywhere(a, &mut action_set, Some(&mut match_set))
            .is_some());
        assert_eq!(population.len(), 1);
        assert_eq!(match_set.as_slice(), &[b]);
        assert_eq!(action_set.as_slice(), &[b]);
        assert!(population.get(a).is_none());
    }

    #[test]
    fn test_expand() {
        let mut population = Population::new();
        let a = population.insert(classifier("1###", 0, "####").numerosity(2));
        let b = population.insert(classifier("####", 0, "####"));
        let set: ClassifierSet = [a, b].into_iter().collect();
        assert_eq!(population.expand(&set), vec![a, a, b]);
        assert_eq!(population.set_numerosity(&set), 3);
        assert_eq!(population.numerosity(), 3);
    }

    #[test]
    fn test_maximum_fitness() {
        let mut population = Population::new();
        assert_eq!(population.maximum_fitness(&ClassifierSet::new()), 0.0);

        population.insert(classifier("####", 0, "####").quality(1.0).reward(50.0));
        let match_set = population.form_match_set(&Perception::from("0000"));
        assert_eq!(population.maximum_fitness(&match_set), 0.0);

        population.insert(classifier("0###", 0, "1###").quality(0.5).reward(10.0));
        population.insert(classifier("####", 1, "##1#").quality(0.8).reward(10.0));
        let match_set = population.form_match_set(&Perception::from("0000"));
        assert_eq!(population.maximum_fitness(&match_set), 8.0);
    }

    #[test]
    fn test_exists_classifier() {
        let mut population = Population::new();
        population.insert(classifier("0###", 1, "1###").quality(0.6));
        let p0 = Perception::from("0000");
        let p1 = Perception::from("1000");
        assert!(population.exists_classifier(&p0, 1, &p1, 0.5));
        assert!(!population.exists_classifier(&p0, 1, &p1, 0.6));
        assert!(!population.exists_classifier(&p0, 0, &p1, 0.5));
    }

    #[test]
    fn test_find_subsumer_prefers_most_general() {
        let cfg = Acs2Config::new(4, 2);
        let subsumer = |c: &str| classifier(c, 0, "1###").quality(0.95).experience(30);

        let mut population = Population::new();
        let a = population.insert(subsumer("0#0#"));
        let b = population.insert(subsumer("0###"));
        let c = population.insert(subsumer("##0#"));
        let set: ClassifierSet = [a, b, c].into_iter().collect();

        let candidate = classifier("000#", 0, "1###");
        let mut rng = ScriptedRandom::new([], [1]);
        assert_eq!(
            population.find_subsumer(&candidate, &[&set], &cfg, &mut rng),
            Some(c)
        );
        let mut rng = ScriptedRandom::new([], [0]);
        assert_eq!(
            population.find_subsumer(&candidate, &[&set], &cfg, &mut rng),
            Some(b)
        );
    }

    #[test]
    fn test_find_old_classifier() {
        let cfg = Acs2Config::new(4, 2);
        let mut population = Population::new();
        let a = population.insert(classifier("0###", 0, "1###").quality(0.95).experience(30));
        let b = population.insert(classifier("00##", 0, "1###"));
        let set: ClassifierSet = [a, b].into_iter().collect();

        let mut rng = ScriptedRandom::default();
        let candidate = classifier("00##", 0, "1###");
        assert_eq!(
            population.find_old_classifier(&candidate, &[&set], false, &cfg, &mut rng),
            Some(b)
        );
        assert_eq!(
            population.find_old_classifier(&candidate, &[&set], true, &cfg, &mut rng),
            Some(a)
        );
    }

    #[test]
    fn test_insert_checked_rejects_wrong_length() {
        let cfg = Acs2Config::new(4, 2);
        let mut population = Population::new();

        assert_eq!(
            population.insert_checked(classifier("#", 0, "#"), &cfg),
            Err(Acs2Error::LengthMismatch {
                expected: 4,
                found: 1
            })
        );
        assert!(population
            .insert_checked(classifier("1###", 2, "####"), &cfg)
            .is_err());
        assert!(population.is_empty());

        let id = population.insert_checked(classifier("1###", 1, "####"), &cfg);
        assert!(id.is_ok());
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn test_check_members() {
        let cfg = Acs2Config::new(4, 2);
        let mut population = Population::new();
        let a = population.insert(classifier("1###", 0, "####"));
        let set: ClassifierSet = [a].into_iter().collect();
        assert!(population.check_members(&set, &cfg).is_ok());

        let b = population.insert(classifier("1#", 0, "##"));
        let set: ClassifierSet = [a, b].into_iter().collect();
        assert!(population.check_members(&set, &cfg).is_err());
    }

    #[test]
    fn test_views_over_a_large_population() {
        let mut population = Population::new();
        for i in 0..20_000 {
            let condition = if i % 2 == 0 { "1###" } else { "0###" };
            population.insert(classifier(condition, i % 3, "####"));
        }

        let match_set = population.form_match_set(&Perception::from("1000"));
        assert_eq!(match_set.len(), 10_000);
        assert!(match_set.as_slice().windows(2).all(|w| w[0] < w[1]));

        let action_set = population.form_action_set(&match_set, 0);
        assert_eq!(action_set.len(), 3_334);

        let candidate = classifier("1###", 0, "####");
        let found = population.find_similar(&candidate, &[&action_set, &match_set]);
        assert_eq!(found, action_set.iter().next());
    }
}

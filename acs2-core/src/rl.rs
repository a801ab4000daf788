//! Reinforcement learning of the reward predictions.
use crate::{Acs2Config, ActionSet, Population};

/// Updates the reward predictions of the classifiers in `action_set`.
///
/// `max_p` is the bootstrapped value of the next situation, usually
/// [`Population::maximum_fitness`] of the next match set, and zero at the
/// end of an episode.
pub fn apply_reinforcement_learning(
    population: &mut Population,
    action_set: &ActionSet,
    reward: f64,
    max_p: f64,
    cfg: &Acs2Config,
) {
    let p = reward + cfg.gamma * max_p;
    for id in action_set.iter() {
        if let Some(cl) = population.get_mut(id) {
            cl.update_reward(p, cfg.beta);
            cl.update_intermediate_reward(reward, cfg.beta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Classifier, Condition, Effect, Perception};

    #[test]
    fn test_reward_update() {
        let cfg = Acs2Config::new(4, 2).beta(0.2).gamma(0.95);
        let mut population = Population::new();
        let id = population.insert(
            Classifier::new(Condition::general(4), 0, Effect::general(4))
                .quality(0.95)
                .reward(10.0),
        );
        let match_set = population.form_match_set(&Perception::from("0000"));
        let action_set = population.form_action_set(&match_set, 0);

        apply_reinforcement_learning(&mut population, &action_set, 2.0, 8.0, &cfg);

        let cl = population.get(id).unwrap();
        assert!((cl.r - 9.92).abs() < 1e-9);
        assert!((cl.ir - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_classifiers_outside_action_set_are_untouched() {
        let cfg = Acs2Config::new(4, 2);
        let mut population = Population::new();
        let id = population.insert(Classifier::new(Condition::general(4), 1, Effect::general(4)));

        apply_reinforcement_learning(&mut population, &ActionSet::new(), 100.0, 0.0, &cfg);

        assert_eq!(population.get(id).map(|cl| cl.r), Some(0.5));
    }
}

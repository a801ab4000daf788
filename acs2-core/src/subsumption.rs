//! Subsumption, the generality-preserving merge rule shared by ALP and GA.
use crate::{Acs2Config, Classifier};

/// Returns `true` if `cl` is experienced, reliable and was never marked.
pub fn is_subsumer(cl: &Classifier, cfg: &Acs2Config) -> bool {
    cl.exp > cfg.theta_exp && cl.is_reliable(cfg.theta_r) && !cl.is_marked()
}

/// Returns `true` if `cl` subsumes `other`.
///
/// `cl` must be a subsumer and strictly more general than `other`. Every
/// attribute `cl` specifies must be specified with the same value in
/// `other`, and both must have the same action and effect.
pub fn does_subsume(cl: &Classifier, other: &Classifier, cfg: &Acs2Config) -> bool {
    is_subsumer(cl, cfg)
        && cl.is_more_general(other)
        && cl.condition.covers(&other.condition)
        && cl.action == other.action
        && cl.effect == other.effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Effect};

    fn cfg() -> Acs2Config {
        Acs2Config::new(8, 4)
    }

    fn subsumer(condition: &str) -> Classifier {
        Classifier::new(Condition::from(condition), 1, Effect::from("###1####"))
            .quality(0.93)
            .experience(21)
    }

    #[test]
    fn test_is_subsumer() {
        let cfg = cfg();
        assert!(is_subsumer(&subsumer("###0####"), &cfg));
        assert!(!is_subsumer(&subsumer("###0####").experience(20), &cfg));
        assert!(!is_subsumer(&subsumer("###0####").quality(0.9), &cfg));

        let mut marked = subsumer("###0####");
        marked.set_mark(&"11111111".into());
        assert!(!is_subsumer(&marked, &cfg));
    }

    #[test]
    fn test_does_subsume() {
        let cfg = cfg();
        let general = subsumer("###0####");
        let specific = Classifier::new(Condition::from("1##0####"), 1, Effect::from("###1####"));
        assert!(does_subsume(&general, &specific, &cfg));
        assert!(!does_subsume(&specific, &general, &cfg));
    }

    #[test]
    fn test_does_not_subsume_itself() {
        let cfg = cfg();
        let cl = subsumer("###0####");
        assert!(!does_subsume(&cl, &cl, &cfg));
    }

    #[test]
    fn test_does_not_subsume_different_rules() {
        let cfg = cfg();
        let general = subsumer("###0####");

        let other_value = Classifier::new(Condition::from("1##1####"), 1, Effect::from("###1####"));
        assert!(!does_subsume(&general, &other_value, &cfg));

        let other_action = Classifier::new(Condition::from("1##0####"), 2, Effect::from("###1####"));
        assert!(!does_subsume(&general, &other_action, &cfg));

        let other_effect = Classifier::new(Condition::from("1##0####"), 1, Effect::from("####1###"));
        assert!(!does_subsume(&general, &other_effect, &cfg));

        // more general, but specifies an attribute `other` leaves open
        let crossing = subsumer("1#######");
        let other_open = Classifier::new(Condition::from("#00#####"), 1, Effect::from("###1####"));
        assert!(!does_subsume(&crossing, &other_open, &cfg));
    }
}

use acs2_core::{
    apply_alp, apply_ga, apply_reinforcement_learning, Acs2Config, ActionSet, Classifier,
    ClassifierSet, Condition, Credit, Effect, Perception, Population, ScriptedRandom,
};
use rand::{rngs::StdRng, SeedableRng};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_covering_on_empty_population() -> acs2_core::Result<()> {
    init();
    let cfg = Acs2Config::new(4, 2);
    let mut rng = ScriptedRandom::default();
    let mut population = Population::new();
    let p0 = Perception::from("1211");
    let p1 = Perception::from("2211");
    let mut match_set = population.form_match_set(&p0);
    let mut action_set = population.form_action_set(&match_set, 1);

    apply_alp(
        &p0,
        1,
        &p1,
        0,
        &mut population,
        Some(&mut match_set),
        &mut action_set,
        &cfg,
        &mut rng,
    )?;

    assert_eq!(population.len(), 1);
    let (_, cl) = population.iter().next().unwrap();
    assert_eq!(cl.condition, Condition::from("1###"));
    assert_eq!(cl.effect, Effect::from("2###"));
    assert_eq!(cl.action, 1);
    assert_eq!(cl.q, 0.5);
    assert_eq!(cl.r, 0.0);
    assert_eq!(cl.exp, 0);
    assert_eq!(action_set.len(), 1);
    Ok(())
}

#[test]
fn test_covering_specifies_changed_attributes_only() -> acs2_core::Result<()> {
    let cfg = Acs2Config::new(8, 4);
    let mut rng = ScriptedRandom::default();
    let mut population = Population::new();
    let mut action_set = ActionSet::new();
    let p0 = Perception::from("01234567");
    let p1 = Perception::from("01934560");

    apply_alp(&p0, 3, &p1, 5, &mut population, None, &mut action_set, &cfg, &mut rng)?;

    let (_, cl) = population.iter().next().unwrap();
    assert_eq!(cl.condition, Condition::from("##2####7"));
    assert_eq!(cl.effect, Effect::from("##9####0"));
    assert_eq!((cl.tga, cl.talp), (5, 5));
    Ok(())
}

#[test]
fn test_reinforcement_learning_step() {
    let cfg = Acs2Config::new(4, 2).beta(0.2).gamma(0.95);
    let mut population = Population::new();

    // an action set of one classifier
    let id = population.insert(
        Classifier::new(Condition::from("1###"), 0, Effect::from("2###"))
            .quality(0.95)
            .reward(10.0),
    );
    let action_set: ClassifierSet = [id].into_iter().collect();

    // the best classifier of the next match set has fitness 8
    let next = population.insert(
        Classifier::new(Condition::from("2###"), 1, Effect::from("1###"))
            .quality(0.8)
            .reward(10.0),
    );
    let match_set: ClassifierSet = [next].into_iter().collect();
    let max_p = population.maximum_fitness(&match_set);
    assert!((max_p - 8.0).abs() < 1e-12);

    apply_reinforcement_learning(&mut population, &action_set, 2.0, max_p, &cfg);

    let cl = population.get(id).unwrap();
    assert!((cl.r - 9.92).abs() < 1e-9);
    assert!((cl.ir - 0.4).abs() < 1e-9);
    assert_eq!(population.get(next).unwrap().r, 10.0);
}

#[test]
fn test_ga_gate() -> acs2_core::Result<()> {
    let cfg = Acs2Config::new(4, 2).theta_ga(100).do_ga(true);
    let situation = Perception::from("0000");
    let mut population = Population::new();
    for c in ["0###", "#0##", "##0#"] {
        population.insert(Classifier::new(Condition::from(c), 0, Effect::from("###1")));
    }
    let mut match_set = population.form_match_set(&situation);
    let mut action_set = population.form_action_set(&match_set, 0);
    let mut rng = StdRng::seed_from_u64(42);

    let fired = apply_ga(
        100,
        &mut population,
        Some(&mut match_set),
        &mut action_set,
        &situation,
        &cfg,
        &mut rng,
    )?;
    assert!(!fired);

    let fired = apply_ga(
        101,
        &mut population,
        Some(&mut match_set),
        &mut action_set,
        &situation,
        &cfg,
        &mut rng,
    )?;
    assert!(fired);
    for id in action_set.iter() {
        assert_eq!(population.get(id).map(|cl| cl.tga), Some(101));
    }

    // all timestamps were refreshed, so the GA rests again
    let fired = apply_ga(
        102,
        &mut population,
        Some(&mut match_set),
        &mut action_set,
        &situation,
        &cfg,
        &mut rng,
    )?;
    assert!(!fired);
    Ok(())
}

#[test]
fn test_insertion_is_idempotent() -> acs2_core::Result<()> {
    let cfg = Acs2Config::new(4, 2);
    let mut rng = ScriptedRandom::default();
    let mut population = Population::new();
    let mut action_set = ActionSet::new();
    let candidate = Classifier::new(Condition::from("1#0#"), 1, Effect::from("0###"));

    for credit in [Credit::Quality, Credit::Quality, Credit::Numerosity] {
        let insertion = population.insert_with_subsumption_check(
            candidate.clone(),
            &[&action_set],
            credit,
            &cfg,
            &mut rng,
        )?;
        action_set.push(insertion.id());
    }
    assert_eq!(population.len(), 1);
    Ok(())
}

#[test_log::test]
fn test_learning_keeps_views_consistent() -> acs2_core::Result<()> {
    let cfg = Acs2Config::new(4, 2)
        .beta(0.2)
        .theta_ga(5)
        .theta_as(6)
        .do_ga(true);
    let mut rng = StdRng::seed_from_u64(7);
    let mut population = Population::new();

    // a two-state world: action 0 toggles the first attribute, action 1
    // does nothing
    let states = [Perception::from("0101"), Perception::from("1101")];
    let mut state = 0;
    for time in 0..500u64 {
        let action = (time % 3 == 0) as usize;
        let p0 = states[state].clone();
        if action == 0 {
            state = 1 - state;
        }
        let p1 = states[state].clone();

        let match_set = population.form_match_set(&p0);
        let mut action_set = population.form_action_set(&match_set, action);
        let mut next_match_set = population.form_match_set(&p1);

        apply_alp(
            &p0,
            action,
            &p1,
            time,
            &mut population,
            Some(&mut next_match_set),
            &mut action_set,
            &cfg,
            &mut rng,
        )?;
        let max_p = population.maximum_fitness(&next_match_set);
        apply_reinforcement_learning(&mut population, &action_set, 0.0, max_p, &cfg);
        apply_ga(
            time,
            &mut population,
            Some(&mut next_match_set),
            &mut action_set,
            &p1,
            &cfg,
            &mut rng,
        )?;

        assert!(action_set.iter().all(|id| population.get(id).is_some()));
        assert!(next_match_set.iter().all(|id| population.get(id).is_some()));
        assert!(population.iter().all(|(_, cl)| cl.num >= 1));
        assert!(population.set_numerosity(&action_set) <= cfg.theta_as + 2);
    }

    // the toggling transition is learned reliably
    let p0 = &states[0];
    let p1 = &states[1];
    assert!(population.exists_classifier(p0, 0, p1, cfg.theta_r));
    Ok(())
}

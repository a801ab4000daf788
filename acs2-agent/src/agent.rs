//! ACS2 agent and its trial loops.
use crate::{best_action, AgentConfig, Env};
use acs2_core::{
    apply_alp, apply_ga, apply_reinforcement_learning,
    record::{Record, RecordValue, Recorder},
    search_goal_sequence, Action, ActionSet, MatchSet, Perception, Population,
};
use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

/// A transition whose outcome has not been learned from yet.
struct PendingStep {
    perception: Perception,
    action: Action,
    reward: f64,
    action_set: ActionSet,
}

/// State of a running explore trial.
struct TrialState {
    perception: Perception,
    pending: Option<PendingStep>,
    result: TrialResult,
}

impl TrialState {
    fn new(perception: Perception) -> Self {
        Self {
            perception,
            pending: None,
            result: TrialResult {
                steps: 0,
                reward: 0.0,
                is_terminated: false,
            },
        }
    }
}

/// Kind of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Explore,
    Exploit,
}

impl Phase {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Explore => "explore",
            Self::Exploit => "exploit",
        }
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// Number of environment steps in the trial.
    pub steps: usize,

    /// Sum of rewards in the trial.
    pub reward: f64,

    /// If the episode ended before the step limit.
    pub is_terminated: bool,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// An ACS2 agent learning from an [`Env`].
///
/// # Explore trial
///
/// Each environment step of an explore trial runs the learning passes on the
/// action set of the previous step, then acts:
///
/// ```mermaid
/// graph TD
///     A[Env::reset] --> B[form match set of p1]
///     B --> C{previous action set?}
///     C -->|yes| D[ALP, RL with max fitness of the match set, GA]
///     C -->|no| E[explorer chooses an action]
///     D --> E
///     E --> F[form action set]
///     F --> G[Env::step]
///     G -->|terminated| H[ALP, RL with zero bootstrap, GA]
///     G -->|running| B
/// ```
///
/// GA only runs if `do_ga` is set in [`Acs2Config`](acs2_core::Acs2Config).
/// When the step limit cuts a trial, the last transition is learned with
/// the bootstrapped value of the next match set.
///
/// # Action planning
///
/// If `do_action_planning` is set, a planning phase starts whenever the time
/// is a multiple of `action_planning_frequency`. The agent asks the
/// environment for goals ([`Env::goal_state`]) and executes the sequences
/// found by [`search_goal_sequence`], learning from every step as above.
/// The phase ends when there is no goal, no sequence, or a step was not
/// anticipated by a reliable classifier of its action set.
///
/// # Exploit trial
///
/// Exploit trials always take the best action and only update the reward
/// predictions.
pub struct Acs2Agent {
    config: AgentConfig,
    population: Population,
    rng: StdRng,
    time: u64,
    trials: usize,
    total_steps: usize,
}

impl Acs2Agent {
    /// Constructs an agent with an empty population.
    pub fn build(config: AgentConfig) -> Result<Self> {
        config.acs2.validate()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            population: Population::new(),
            time: 0,
            trials: 0,
            total_steps: 0,
        })
    }

    /// Constructs an agent starting from an existing population.
    ///
    /// Fails if a classifier does not fit the configuration.
    pub fn with_population(config: AgentConfig, population: Population) -> Result<Self> {
        for (_, cl) in population.iter() {
            config.acs2.check_classifier(cl)?;
        }
        let mut agent = Self::build(config)?;
        agent.population = population;
        Ok(agent)
    }

    /// The population learned so far.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Configuration of the agent.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Number of environment steps taken in explore trials.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Runs `n_trials` explore trials.
    pub fn explore<E: Env>(
        &mut self,
        env: &mut E,
        n_trials: usize,
        recorder: &mut dyn Recorder,
    ) -> Result<Vec<TrialResult>> {
        self.run(env, n_trials, recorder, |_| Phase::Explore)
    }

    /// Runs `n_trials` exploit trials.
    pub fn exploit<E: Env>(
        &mut self,
        env: &mut E,
        n_trials: usize,
        recorder: &mut dyn Recorder,
    ) -> Result<Vec<TrialResult>> {
        self.run(env, n_trials, recorder, |_| Phase::Exploit)
    }

    /// Runs `n_trials` trials alternating between explore and exploit,
    /// starting with explore.
    pub fn explore_exploit<E: Env>(
        &mut self,
        env: &mut E,
        n_trials: usize,
        recorder: &mut dyn Recorder,
    ) -> Result<Vec<TrialResult>> {
        self.run(env, n_trials, recorder, |i| match i % 2 {
            0 => Phase::Explore,
            _ => Phase::Exploit,
        })
    }

    fn run<E: Env>(
        &mut self,
        env: &mut E,
        n_trials: usize,
        recorder: &mut dyn Recorder,
        phase_of: impl Fn(usize) -> Phase,
    ) -> Result<Vec<TrialResult>> {
        let mut results = Vec::with_capacity(n_trials);

        for i in 0..n_trials {
            let phase = phase_of(i);
            let start_time = Local::now();
            let result = match phase {
                Phase::Explore => self.explore_trial(env)?,
                Phase::Exploit => self.exploit_trial(env)?,
            };
            self.trials += 1;
            self.total_steps += result.steps;

            if self.config.metrics_trial_frequency > 0
                && i % self.config.metrics_trial_frequency == 0
            {
                recorder.write(self.metrics(phase, &result, start_time));
            }
            results.push(result);
        }
        recorder.flush();

        Ok(results)
    }

    fn metrics(
        &self,
        phase: Phase,
        result: &TrialResult,
        start_time: DateTime<Local>,
    ) -> Record {
        let stats = self.population.stats(self.config.acs2.theta_r);
        info!(
            "trial {} ({}): steps {}, reward {}, population {}, reliable {}",
            self.trials,
            phase.as_str(),
            result.steps,
            result.reward,
            stats.macro_size,
            stats.reliable,
        );

        let record = Record::from_slice(&[
            ("trial", RecordValue::Scalar(self.trials as _)),
            ("steps_in_trial", RecordValue::Scalar(result.steps as _)),
            ("total_steps", RecordValue::Scalar(self.total_steps as _)),
            ("reward", RecordValue::Scalar(result.reward)),
            ("phase", RecordValue::String(phase.as_str().to_string())),
            ("start_time", RecordValue::DateTime(start_time)),
        ]);
        record.merge(stats.into())
    }

    fn explore_trial<E: Env>(&mut self, env: &mut E) -> Result<TrialResult> {
        let mut state = TrialState::new(env.reset()?);
        let max_steps = self.config.max_steps_per_trial;

        while !state.result.is_terminated && state.result.steps < max_steps {
            let cfg = &self.config.acs2;
            if cfg.do_action_planning && self.time % cfg.action_planning_frequency == 0 {
                self.plan(env, &mut state)?;
                if state.result.is_terminated || state.result.steps >= max_steps {
                    break;
                }
            }
            self.explore_step(env, &mut state, None)?;
        }

        if let Some(last) = state.pending.take() {
            let mut match_set = self
                .population
                .form_match_set_checked(&state.perception, &self.config.acs2)?;
            self.learn(last, &state.perception, Some(&mut match_set))?;
            debug!("explore trial cut at {} steps", state.result.steps);
        }
        Ok(state.result)
    }

    /// Runs one environment step of an explore trial.
    ///
    /// The action is chosen by the explorer unless `action` is given.
    /// Returns `true` if a reliable classifier of the action set anticipated
    /// the transition.
    fn explore_step<E: Env>(
        &mut self,
        env: &mut E,
        state: &mut TrialState,
        action: Option<Action>,
    ) -> Result<bool> {
        let mut match_set = self
            .population
            .form_match_set_checked(&state.perception, &self.config.acs2)?;
        if let Some(last) = state.pending.take() {
            self.learn(last, &state.perception, Some(&mut match_set))?;
        }

        let action = match action {
            Some(action) => action,
            None => self.config.explorer.action(
                &self.population,
                &match_set,
                self.config.acs2.number_of_possible_actions,
                &mut self.rng,
            ),
        };
        let action_set = self.population.form_action_set(&match_set, action);

        let step = env.step(action)?;
        self.time += 1;
        state.result.steps += 1;
        state.result.reward += step.reward;

        let last = PendingStep {
            perception: std::mem::replace(&mut state.perception, step.perception),
            action,
            reward: step.reward,
            action_set,
        };
        let theta_r = self.config.acs2.theta_r;
        let anticipated = self.population.members(&last.action_set).any(|(_, cl)| {
            cl.is_reliable(theta_r) && cl.anticipates_correctly(&last.perception, &state.perception)
        });

        if step.is_terminated {
            state.result.is_terminated = true;
            self.learn(last, &state.perception, None)?;
        } else {
            state.pending = Some(last);
        }
        Ok(anticipated)
    }

    /// Executes goal sequences until the environment has no goal left or a
    /// sequence fails.
    fn plan<E: Env>(&mut self, env: &mut E, state: &mut TrialState) -> Result<()> {
        let max_steps = self.config.max_steps_per_trial;

        while !state.result.is_terminated && state.result.steps < max_steps {
            let goal = match env.goal_state()? {
                Some(goal) => goal,
                None => break,
            };
            let sequence = search_goal_sequence(
                &self.population,
                &state.perception,
                &goal,
                &self.config.acs2,
            )?;
            let sequence = match sequence {
                Some(sequence) if !sequence.is_empty() => sequence,
                _ => break,
            };
            debug!(
                "plan {:?} from {} to {}",
                sequence, state.perception, goal
            );

            for action in sequence {
                if state.result.is_terminated || state.result.steps >= max_steps {
                    return Ok(());
                }
                if !self.explore_step(env, state, Some(action))? {
                    debug!("planned step {} was not anticipated", action);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Applies ALP, RL and GA to the action set of `last`.
    ///
    /// Without a match set the transition ended the episode and the reward
    /// is not bootstrapped.
    fn learn(
        &mut self,
        mut last: PendingStep,
        p1: &Perception,
        mut match_set: Option<&mut MatchSet>,
    ) -> Result<()> {
        let cfg = &self.config.acs2;
        apply_alp(
            &last.perception,
            last.action,
            p1,
            self.time,
            &mut self.population,
            match_set.as_deref_mut(),
            &mut last.action_set,
            cfg,
            &mut self.rng,
        )?;

        let max_p = match match_set.as_deref() {
            Some(match_set) => self.population.maximum_fitness(match_set),
            None => 0.0,
        };
        apply_reinforcement_learning(
            &mut self.population,
            &last.action_set,
            last.reward,
            max_p,
            cfg,
        );

        if cfg.do_ga {
            apply_ga(
                self.time,
                &mut self.population,
                match_set,
                &mut last.action_set,
                p1,
                cfg,
                &mut self.rng,
            )?;
        }
        Ok(())
    }

    fn exploit_trial<E: Env>(&mut self, env: &mut E) -> Result<TrialResult> {
        let cfg = &self.config.acs2;
        let mut perception = env.reset()?;
        let mut last: Option<(ActionSet, f64)> = None;
        let mut result = TrialResult {
            steps: 0,
            reward: 0.0,
            is_terminated: false,
        };

        while result.steps < self.config.max_steps_per_trial {
            let match_set = self.population.form_match_set_checked(&perception, cfg)?;
            if let Some((action_set, reward)) = last.take() {
                let max_p = self.population.maximum_fitness(&match_set);
                apply_reinforcement_learning(
                    &mut self.population,
                    &action_set,
                    reward,
                    max_p,
                    cfg,
                );
            }

            let action = best_action(
                &self.population,
                &match_set,
                cfg.number_of_possible_actions,
                &mut self.rng,
            );
            let action_set = self.population.form_action_set(&match_set, action);

            let step = env.step(action)?;
            result.steps += 1;
            result.reward += step.reward;
            perception = step.perception;

            if step.is_terminated {
                result.is_terminated = true;
                apply_reinforcement_learning(
                    &mut self.population,
                    &action_set,
                    step.reward,
                    0.0,
                    cfg,
                );
                break;
            }
            last = Some((action_set, step.reward));
        }

        Ok(result)
    }
}

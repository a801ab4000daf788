//! Classifier.
use crate::{Condition, Effect, Mark, Pattern, Perception, RandomSource, Symbol, DEFAULT_WILDCARD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an action.
pub type Action = usize;

/// A condition-action-effect rule together with its learned statistics.
///
/// The rule reads "if the condition matches and the action is executed, the
/// perception changes as the effect anticipates".
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Classifier {
    /// Situations in which the classifier can be applied.
    pub condition: Condition,

    /// Action of the classifier.
    pub action: Action,

    /// Anticipated consequences of the action.
    pub effect: Effect,

    /// Values in which the classifier anticipated incorrectly.
    pub mark: Mark,

    /// Quality, the accuracy of the anticipation in `[0, 1]`.
    pub q: f64,

    /// Reward prediction.
    pub r: f64,

    /// Intermediate reward prediction.
    pub ir: f64,

    /// Number of micro-classifiers this classifier stands for.
    pub num: usize,

    /// Number of ALP updates.
    pub exp: u64,

    /// Time of the last GA application in an action set of this classifier.
    pub tga: u64,

    /// Time of the last ALP update.
    pub talp: u64,

    /// Average time between two ALP updates.
    pub tav: f64,
}

impl Classifier {
    /// Constructs a classifier with initial statistics.
    pub fn new(condition: Condition, action: Action, effect: Effect) -> Self {
        debug_assert_eq!(condition.len(), effect.len());
        let mark = Mark::new(condition.len());
        Self {
            condition,
            action,
            effect,
            mark,
            q: 0.5,
            r: 0.5,
            ir: 0.0,
            num: 1,
            exp: 1,
            tga: 0,
            talp: 0,
            tav: 0.0,
        }
    }

    /// Constructs a classifier explaining the transition `p0 -> p1` exactly.
    ///
    /// Attributes that changed are specified in both the condition (with the
    /// value of `p0`) and the effect (with the value of `p1`). The covering
    /// classifier has never been applied, so its experience is zero.
    pub fn cover(p0: &Perception, action: Action, p1: &Perception, time: u64) -> Self {
        let mut cl = Self::new(Condition::general(p0.len()), action, Effect::general(p0.len()));
        cl.specialize(p0, p1, false);
        cl.r = 0.0;
        cl.exp = 0;
        cl.tga = time;
        cl.talp = time;
        cl
    }

    /// Sets the quality.
    pub fn quality(mut self, v: f64) -> Self {
        self.q = v;
        self
    }

    /// Sets the reward prediction.
    pub fn reward(mut self, v: f64) -> Self {
        self.r = v;
        self
    }

    /// Sets the intermediate reward prediction.
    pub fn intermediate_reward(mut self, v: f64) -> Self {
        self.ir = v;
        self
    }

    /// Sets the numerosity.
    pub fn numerosity(mut self, v: usize) -> Self {
        self.num = v;
        self
    }

    /// Sets the experience.
    pub fn experience(mut self, v: u64) -> Self {
        self.exp = v;
        self
    }

    /// Sets the GA timestamp.
    pub fn ga_timestamp(mut self, v: u64) -> Self {
        self.tga = v;
        self
    }

    /// Sets the ALP timestamp.
    pub fn alp_timestamp(mut self, v: u64) -> Self {
        self.talp = v;
        self
    }

    /// Sets the application average.
    pub fn application_average(mut self, v: f64) -> Self {
        self.tav = v;
        self
    }

    /// Returns a copy made at `time`.
    ///
    /// The copy keeps condition, action, effect, quality, reward predictions
    /// and the application average. Its mark is empty, numerosity and
    /// experience are one and both timestamps are set to `time`.
    pub fn copy_from(&self, time: u64) -> Self {
        Self {
            condition: self.condition.clone(),
            action: self.action,
            effect: self.effect.clone(),
            mark: Mark::new(self.condition.len()),
            q: self.q,
            r: self.r,
            ir: self.ir,
            num: 1,
            exp: 1,
            tga: time,
            talp: time,
            tav: self.tav,
        }
    }

    /// Fitness, the product of quality and reward prediction.
    pub fn fitness(&self) -> f64 {
        self.q * self.r
    }

    /// Returns `true` if the quality is above `theta_r`.
    pub fn is_reliable(&self, theta_r: f64) -> bool {
        self.q > theta_r
    }

    /// Returns `true` if the quality is below `theta_i`.
    pub fn is_inadequate(&self, theta_i: f64) -> bool {
        self.q < theta_i
    }

    /// Returns `true` if the classifier anticipated incorrectly before.
    pub fn is_marked(&self) -> bool {
        self.mark.is_marked()
    }

    /// Returns `true` if the effect anticipates any change.
    pub fn does_anticipate_change(&self) -> bool {
        self.effect.does_anticipate_change()
    }

    /// Returns `true` if condition, action and effect equal those of `other`.
    pub fn is_similar(&self, other: &Classifier) -> bool {
        self.condition == other.condition
            && self.action == other.action
            && self.effect == other.effect
    }

    /// Returns `true` if the condition has strictly fewer specified
    /// attributes than the condition of `other`.
    pub fn is_more_general(&self, other: &Classifier) -> bool {
        self.condition.specificity() < other.condition.specificity()
    }

    /// Returns `true` if the classifier is applicable in `p0` with `action`
    /// and anticipates `p1` correctly.
    pub fn predicts_successfully(&self, p0: &Perception, action: Action, p1: &Perception) -> bool {
        self.condition.matches(p0) && self.action == action && self.anticipates_correctly(p0, p1)
    }

    /// Returns `true` if the effect anticipates `p0 -> p1`.
    pub fn anticipates_correctly(&self, p0: &Perception, p1: &Perception) -> bool {
        self.effect.anticipates_correctly(p0, p1)
    }

    /// The perception anticipated after acting in `p0`.
    pub fn anticipation(&self, p0: &Perception) -> Perception {
        self.effect.anticipation(p0)
    }

    /// The perception from which the action leads to `p1`, or `None` if the
    /// classifier can not explain arriving in `p1`.
    ///
    /// The specified condition attributes are laid over `p1`. The effect must
    /// anticipate the transition from the resulting perception to `p1`.
    pub fn backwards_anticipation(&self, p1: &Perception) -> Option<Perception> {
        let p0 = self.condition.overlay(p1);
        if self.effect.anticipates_correctly(&p0, p1) {
            Some(p0)
        } else {
            None
        }
    }

    /// Moves the quality towards one.
    pub fn increase_quality(&mut self, beta: f64) {
        self.q += beta * (1.0 - self.q);
    }

    /// Moves the quality towards zero.
    pub fn decrease_quality(&mut self, beta: f64) {
        self.q -= beta * self.q;
    }

    /// Moves the reward prediction towards `p`.
    pub fn update_reward(&mut self, p: f64, beta: f64) {
        self.r += beta * (p - self.r);
    }

    /// Moves the intermediate reward prediction towards `reward`.
    pub fn update_intermediate_reward(&mut self, reward: f64, beta: f64) {
        self.ir += beta * (reward - self.ir);
    }

    /// Increments the experience.
    pub fn increase_experience(&mut self) {
        self.exp += 1;
    }

    /// Updates the application average and sets the ALP timestamp.
    ///
    /// The average is arithmetic while `1 / exp > beta` and a moving
    /// average with rate `beta` afterwards.
    pub fn set_alp_timestamp(&mut self, time: u64, beta: f64) {
        let elapsed = time.saturating_sub(self.talp) as f64;
        let exp = self.exp as f64;
        if exp == 0.0 || 1.0 / exp > beta {
            self.tav = (self.tav * exp + elapsed) / (exp + 1.0);
        } else {
            self.tav += beta * (elapsed - self.tav);
        }
        self.talp = time;
    }

    /// Marks the classifier with perception `p0`.
    pub fn set_mark(&mut self, p0: &Perception) -> bool {
        self.mark.set_using_condition(&self.condition, p0)
    }

    /// Specializes condition and effect so that the classifier explains the
    /// transition `p0 -> p1`.
    ///
    /// With `leave_specialized`, attributes whose effect is already specified
    /// are left untouched.
    pub fn specialize(&mut self, p0: &Perception, p1: &Perception, leave_specialized: bool) {
        debug_assert_eq!(p0.len(), p1.len());
        for i in 0..p1.len() {
            if leave_specialized && self.effect.get(i).is_some() {
                continue;
            }
            if p0[i] != p1[i] {
                self.effect.specialize_at(i, p1[i]);
                self.condition.specialize_at(i, p0[i]);
            }
        }
    }

    /// Indices of attributes specified in the condition but anticipated to
    /// stay unchanged.
    pub fn specified_unchanging_attributes(&self) -> Vec<usize> {
        (0..self.condition.len())
            .filter(|&i| self.condition.get(i).is_some() && self.effect.get(i).is_none())
            .collect()
    }

    /// Generalizes one specified unchanging attribute chosen at random.
    ///
    /// Returns `false` if there is no such attribute.
    pub fn generalize_unchanging_condition_attribute<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> bool {
        let candidates = self.specified_unchanging_attributes();
        if candidates.is_empty() {
            return false;
        }
        let idx = candidates[rng.below(candidates.len())];
        self.condition.generalize(idx);
        true
    }
}

impl Classifier {
    /// Formats the classifier with the given wildcard symbol.
    pub fn format_with(&self, wildcard: Symbol) -> String {
        format!(
            "{} {} {} q: {:.3} r: {:.3} ir: {:.3} f: {:.3} exp: {} num: {}",
            self.condition.format_with(wildcard),
            self.action,
            self.effect.format_with(wildcard),
            self.q,
            self.r,
            self.ir,
            self.fitness(),
            self.exp,
            self.num
        )
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(DEFAULT_WILDCARD))
    }
}

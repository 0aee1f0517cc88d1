use std::fmt;

use super::condition::RuleCondition;
use super::ruleset::MatchType;

/// Outcome of one effective condition within a [`MatchReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    pub condition: RuleCondition,
    pub matched: bool,
}

/// Detailed match report returned by
/// [`RuleSet::evaluate_detailed()`](super::ruleset::RuleSet::evaluate_detailed).
///
/// Every effective condition is evaluated (no short-circuiting) so an editor
/// can show which conditions held. Conditions with blank values are listed
/// separately because they never contribute to the result.
#[derive(Debug, Clone)]
#[must_use]
pub struct MatchReport {
    match_type: MatchType,
    matched: bool,
    outcomes: Vec<ConditionOutcome>,
    skipped: Vec<RuleCondition>,
}

impl MatchReport {
    pub(crate) fn new(
        match_type: MatchType,
        matched: bool,
        outcomes: Vec<ConditionOutcome>,
        skipped: Vec<RuleCondition>,
    ) -> Self {
        Self {
            match_type,
            matched,
            outcomes,
            skipped,
        }
    }

    /// The overall decision, same as [`RuleSet::matches()`](super::ruleset::RuleSet::matches).
    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }

    #[must_use]
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Effective conditions and their outcomes, in authored order.
    #[must_use]
    pub fn outcomes(&self) -> &[ConditionOutcome] {
        &self.outcomes
    }

    /// Conditions ignored because their value was blank.
    #[must_use]
    pub fn skipped(&self) -> &[RuleCondition] {
        &self.skipped
    }

    /// Conditions that held.
    pub fn satisfied(&self) -> impl Iterator<Item = &RuleCondition> {
        self.outcomes
            .iter()
            .filter(|o| o.matched)
            .map(|o| &o.condition)
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.match_type, self.matched)?;
        let held: Vec<String> = self.satisfied().map(ToString::to_string).collect();
        write!(f, ", satisfied: [{}]", held.join(", "))?;
        if !self.skipped.is_empty() {
            write!(f, ", skipped: {}", self.skipped.len())?;
        }
        Ok(())
    }
}

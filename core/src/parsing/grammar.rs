use core::fmt::Debug;
use core::hash::Hash;
use std::collections::HashMap;

/// Display name returned for rules that were never installed.
pub const UNNAMED_RULE: &str = "<unnamed rule>";

/// A stable identifier for a grammar rule, usually a fieldless enum.
pub trait RuleId: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> RuleId for T {}

/// A rule identifier that knows every rule and its display name.
///
/// Derive it with `#[derive(GrammarRule)]`:
///
/// ```ignore
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, GrammarRule)]
/// enum Rule {
///     #[name("expression")]
///     Expr,
///     #[name("primary expression")]
///     Primary,
/// }
///
/// let grammar = Grammar::<Rule>::from_rules();
/// assert_eq!(grammar.name(Rule::Expr), "expression");
/// ```
pub trait GrammarRule: RuleId + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

/// Diagnostic names of grammar rules.
///
/// Names are consulted only when the combinators report "expected <rule>".
/// Each rule is installed once; looking up a rule that was never installed
/// yields [`UNNAMED_RULE`] instead of failing.
#[derive(Debug, Clone)]
pub struct Grammar<R> {
    names: HashMap<R, &'static str>,
}

impl<R: RuleId> Grammar<R> {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Register the display name of `rule`.
    ///
    /// Returns `false` and keeps the existing name if the rule was already
    /// installed.
    pub fn install(&mut self, rule: R, name: &'static str) -> bool {
        if let Some(existing) = self.names.get(&rule) {
            log::warn!(
                "grammar rule {:?} already installed as {:?}; ignoring {:?}",
                rule,
                existing,
                name
            );
            return false;
        }
        self.names.insert(rule, name);
        true
    }

    /// Builder form of [`Grammar::install`].
    pub fn with(mut self, rule: R, name: &'static str) -> Self {
        self.install(rule, name);
        self
    }

    /// Display name of `rule`, or [`UNNAMED_RULE`].
    #[inline]
    pub fn name(&self, rule: R) -> &'static str {
        self.names.get(&rule).copied().unwrap_or(UNNAMED_RULE)
    }

    #[inline]
    pub fn contains(&self, rule: R) -> bool {
        self.names.contains_key(&rule)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (R, &'static str)> + '_ {
        self.names.iter().map(|(rule, name)| (*rule, *name))
    }
}

impl<R: GrammarRule> Grammar<R> {
    /// A grammar with every rule of `R` installed.
    pub fn from_rules() -> Self {
        R::ALL.iter().map(|rule| (*rule, rule.name())).collect()
    }
}

impl<R: RuleId> Default for Grammar<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RuleId> FromIterator<(R, &'static str)> for Grammar<R> {
    fn from_iter<I: IntoIterator<Item = (R, &'static str)>>(iter: I) -> Self {
        let mut grammar = Self::new();
        for (rule, name) in iter {
            grammar.install(rule, name);
        }
        grammar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Rule {
        Expr,
        Term,
        Factor,
    }

    impl GrammarRule for Rule {
        const ALL: &'static [Self] = &[Rule::Expr, Rule::Term, Rule::Factor];

        fn name(self) -> &'static str {
            match self {
                Rule::Expr => "expression",
                Rule::Term => "term",
                Rule::Factor => "factor",
            }
        }
    }

    #[test]
    fn unregistered_rule_gets_placeholder() {
        let grammar = Grammar::new().with(Rule::Expr, "expression");
        assert_eq!(grammar.name(Rule::Expr), "expression");
        assert_eq!(grammar.name(Rule::Term), UNNAMED_RULE);
        assert!(!grammar.contains(Rule::Term));
    }

    #[test]
    fn first_registration_wins() {
        let mut grammar = Grammar::new();
        assert!(grammar.install(Rule::Term, "term"));
        assert!(!grammar.install(Rule::Term, "summand"));
        assert_eq!(grammar.name(Rule::Term), "term");
        assert_eq!(grammar.len(), 1);
    }

    #[test]
    fn from_rules_installs_everything() {
        let grammar = Grammar::<Rule>::from_rules();
        assert_eq!(grammar.len(), 3);
        assert_eq!(grammar.name(Rule::Factor), "factor");
    }

    #[test]
    fn string_identifiers_work_too() {
        let grammar: Grammar<&str> = [("expr", "expression")].into_iter().collect();
        assert_eq!(grammar.name("expr"), "expression");
        assert_eq!(grammar.name("stmt"), UNNAMED_RULE);
    }
}

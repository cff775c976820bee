//! Profile query execution
//!
//! Every query is a full scan of the fact base passed in. Nothing is cached,
//! so a query always reflects the base as of invocation.

use crate::facts::FactBase;
use crate::observability::{log_event_with_fields, Event, METRICS};
use crate::rules::RuleCatalog;

use super::errors::{QueryError, QueryResult};
use super::result::ProfileMatch;

/// Executes named rules over fact bases
#[derive(Debug, Clone, Copy)]
pub struct ProfileQueryEngine<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> ProfileQueryEngine<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        self.catalog
    }

    /// Returns the indices of all facts satisfying `rule_name`, ascending.
    ///
    /// # Errors
    ///
    /// `PLACEMENT_UNKNOWN_RULE` if the catalog has no such rule. The fact
    /// base is never modified.
    pub fn query_profile(&self, fact_base: &FactBase, rule_name: &str) -> QueryResult<ProfileMatch> {
        let rule = match self.catalog.get(rule_name) {
            Some(rule) => rule,
            None => {
                METRICS.increment_profile_queries_rejected();
                log_event_with_fields(Event::ProfileQueryRejected, &[("rule", rule_name)]);
                return Err(QueryError::unknown_rule(rule_name));
            }
        };

        let mut indices: Vec<usize> = fact_base
            .iter()
            .filter(|fact| rule.matches(fact))
            .map(|fact| fact.index())
            .collect();
        // Fact bases are index-ordered already; hand-built ones may not be
        indices.sort_unstable();
        indices.dedup();

        METRICS.increment_profile_queries_executed();
        log_event_with_fields(
            Event::ProfileQueryExecuted,
            &[
                ("rule", rule_name),
                ("matched", indices.len().to_string().as_str()),
                ("scanned", fact_base.len().to_string().as_str()),
            ],
        );

        Ok(ProfileMatch {
            rule: rule.name().to_string(),
            indices,
            scanned_count: fact_base.len(),
            generation: fact_base.generation(),
        })
    }
}

/// Runs `rule_name` from the standard catalog against `fact_base`.
pub fn query_profile(fact_base: &FactBase, rule_name: &str) -> QueryResult<ProfileMatch> {
    let catalog = RuleCatalog::standard();
    ProfileQueryEngine::new(&catalog).query_profile(fact_base, rule_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Fact;
    use crate::query::QueryErrorCode;
    use crate::records::Attribute;
    use crate::rules::{Condition, Rule};

    fn scored(index: usize, cgpa: f64, iq: f64) -> Fact {
        Fact::new(index)
            .with_number(Attribute::Cgpa, cgpa)
            .with_number(Attribute::Iq, iq)
    }

    fn custom_catalog() -> RuleCatalog {
        RuleCatalog::from_rules(vec![Rule::new(
            "high_scores",
            "High scores",
            Condition::all(vec![Condition::gte(Attribute::Cgpa, 90.0), Condition::gte(Attribute::Iq, 85.0)]),
        )])
        .unwrap()
    }

    #[test]
    fn test_only_matching_index_returned() {
        let base = FactBase::from_facts(vec![
            scored(0, 95.0, 80.0),
            scored(1, 92.0, 90.0),
            scored(2, 70.0, 99.0),
        ]);
        let catalog = custom_catalog();
        let result = ProfileQueryEngine::new(&catalog).query_profile(&base, "high_scores").unwrap();

        assert_eq!(result.indices, vec![1]);
        assert_eq!(result.scanned_count, 3);
    }

    #[test]
    fn test_results_ascending_for_unordered_input() {
        let base = FactBase::from_facts(vec![scored(5, 99.0, 99.0), scored(2, 99.0, 99.0), scored(9, 99.0, 99.0)]);
        let catalog = custom_catalog();
        let result = ProfileQueryEngine::new(&catalog).query_profile(&base, "high_scores").unwrap();
        assert_eq!(result.indices, vec![2, 5, 9]);
    }

    #[test]
    fn test_empty_result_not_error() {
        let base = FactBase::from_facts(vec![scored(0, 10.0, 10.0)]);
        let catalog = custom_catalog();
        let result = ProfileQueryEngine::new(&catalog).query_profile(&base, "high_scores").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let base = FactBase::from_facts(vec![scored(0, 10.0, 10.0)]);
        let err = query_profile(&base, "does_not_exist").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::PlacementUnknownRule);
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_standard_catalog_free_function() {
        let base = FactBase::from_facts(vec![
            scored(0, 9.5, 120.0),
            scored(1, 5.0, 90.0),
        ]);
        assert_eq!(query_profile(&base, "candidato_academico_top").unwrap().indices, vec![0]);
        assert_eq!(query_profile(&base, "estudiante_en_riesgo").unwrap().indices, vec![1]);
    }
}

//! Named profile rules
//!
//! The standard catalog holds nine student archetypes. Rule keys are opaque
//! identifiers shared with reporting consumers and must not change.

use serde::Serialize;

use crate::facts::Fact;
use crate::records::Attribute::{
    AcademicPerformance, Cgpa, CommunicationSkills, ExtraCurricularScore, InternshipExperience, Iq,
    PrevSemResult, ProjectsCompleted,
};

use super::ast::Condition;
use super::errors::{RuleError, RuleResult};
use super::evaluator::RuleEvaluator;

pub const CANDIDATO_ACADEMICO_TOP: &str = "candidato_academico_top";
pub const CANDIDATO_PRACTICO: &str = "candidato_practico";
pub const LIDER_COMUNICADOR: &str = "lider_comunicador";
pub const PERFIL_ESFORZADO: &str = "perfil_esforzado";
pub const APUESTA_SEGURA: &str = "apuesta_segura";
pub const TECNICO_SIN_PASANTIA: &str = "tecnico_sin_pasantia";
pub const ESTUDIANTE_EN_RIESGO: &str = "estudiante_en_riesgo";
pub const JOYA_ESCONDIDA: &str = "joya_escondida";
pub const RIESGO_DESMOTIVACION: &str = "riesgo_desmotivacion";

/// An immutable named predicate over one fact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    name: String,
    title: String,
    condition: Condition,
}

impl Rule {
    pub fn new(name: impl Into<String>, title: impl Into<String>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            condition,
        }
    }

    /// Opaque catalog key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable profile title
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Evaluates the rule against a fact
    pub fn matches(&self, fact: &Fact) -> bool {
        RuleEvaluator::matches(fact, &self.condition)
    }
}

/// Closed set of rules addressed by name, kept in definition order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Builds a catalog from arbitrary rules.
    ///
    /// Fails with `PLACEMENT_DUPLICATE_RULE` if two rules share a name.
    pub fn from_rules(rules: Vec<Rule>) -> RuleResult<Self> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(RuleError::DuplicateRule(rule.name.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// The nine placement profiles
    pub fn standard() -> Self {
        let yes = |a| Condition::equals(a, "yes");
        let no = |a| Condition::equals(a, "no");

        Self {
            rules: vec![
                Rule::new(
                    CANDIDATO_ACADEMICO_TOP,
                    "Top academic",
                    Condition::all(vec![Condition::gte(Cgpa, 9.0), Condition::gte(Iq, 110.0)]),
                ),
                Rule::new(
                    CANDIDATO_PRACTICO,
                    "Strong practical experience",
                    Condition::all(vec![yes(InternshipExperience), Condition::gte(ProjectsCompleted, 4.0)]),
                ),
                Rule::new(
                    LIDER_COMUNICADOR,
                    "Leader / great communicator",
                    Condition::all(vec![
                        Condition::gte(CommunicationSkills, 8.0),
                        Condition::gte(ExtraCurricularScore, 7.0),
                    ]),
                ),
                Rule::new(
                    PERFIL_ESFORZADO,
                    "Hard worker (marked improvement)",
                    Condition::all(vec![Condition::lt(PrevSemResult, 7.0), Condition::gte(Cgpa, 8.0)]),
                ),
                Rule::new(
                    APUESTA_SEGURA,
                    "Safe bet (balanced profile)",
                    Condition::all(vec![
                        Condition::gte(Cgpa, 7.5),
                        Condition::gte(CommunicationSkills, 7.0),
                        yes(InternshipExperience),
                        Condition::gte(ProjectsCompleted, 2.0),
                    ]),
                ),
                Rule::new(
                    TECNICO_SIN_PASANTIA,
                    "Technical without internship",
                    Condition::all(vec![
                        no(InternshipExperience),
                        Condition::gte(ProjectsCompleted, 4.0),
                        Condition::gte(Iq, 100.0),
                    ]),
                ),
                Rule::new(
                    ESTUDIANTE_EN_RIESGO,
                    "Academic risk",
                    Condition::any(vec![
                        Condition::lt(Cgpa, 6.0),
                        Condition::all(vec![
                            Condition::lt(PrevSemResult, 6.0),
                            Condition::lte(AcademicPerformance, 4.0),
                        ]),
                    ]),
                ),
                Rule::new(
                    JOYA_ESCONDIDA,
                    "Hidden gem",
                    Condition::all(vec![
                        Condition::gte(Iq, 120.0),
                        Condition::lt(Cgpa, 7.0),
                        Condition::any(vec![
                            Condition::gte(ProjectsCompleted, 3.0),
                            Condition::gte(CommunicationSkills, 7.0),
                        ]),
                    ]),
                ),
                Rule::new(
                    RIESGO_DESMOTIVACION,
                    "Demotivation risk",
                    Condition::all(vec![
                        Condition::gte(PrevSemResult, 7.0),
                        Condition::lte(AcademicPerformance, 4.0),
                        Condition::lte(ExtraCurricularScore, 3.0),
                    ]),
                ),
            ],
        }
    }

    /// Looks up a rule by exact name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Attribute;

    fn student(cgpa: f64, iq: f64, internship: &str, projects: f64) -> Fact {
        Fact::new(0)
            .with_number(Attribute::Cgpa, cgpa)
            .with_number(Attribute::Iq, iq)
            .with_number(Attribute::PrevSemResult, 7.5)
            .with_number(Attribute::AcademicPerformance, 6.0)
            .with_symbol(Attribute::InternshipExperience, internship)
            .with_number(Attribute::ExtraCurricularScore, 5.0)
            .with_number(Attribute::CommunicationSkills, 6.0)
            .with_number(Attribute::ProjectsCompleted, projects)
    }

    #[test]
    fn test_standard_catalog_has_nine_profiles() {
        let catalog = RuleCatalog::standard();
        assert_eq!(catalog.len(), 9);
        for name in [
            CANDIDATO_ACADEMICO_TOP,
            CANDIDATO_PRACTICO,
            LIDER_COMUNICADOR,
            PERFIL_ESFORZADO,
            APUESTA_SEGURA,
            TECNICO_SIN_PASANTIA,
            ESTUDIANTE_EN_RIESGO,
            JOYA_ESCONDIDA,
            RIESGO_DESMOTIVACION,
        ] {
            assert!(catalog.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_top_academic() {
        let rule = RuleCatalog::standard().get(CANDIDATO_ACADEMICO_TOP).cloned().unwrap();
        assert!(rule.matches(&student(9.5, 120.0, "no", 1.0)));
        assert!(!rule.matches(&student(9.5, 100.0, "no", 1.0)));
        assert!(!rule.matches(&student(8.9, 130.0, "no", 1.0)));
    }

    #[test]
    fn test_practical_vs_technical_without_internship() {
        let catalog = RuleCatalog::standard();
        let practical = catalog.get(CANDIDATO_PRACTICO).unwrap();
        let technical = catalog.get(TECNICO_SIN_PASANTIA).unwrap();

        let with_internship = student(7.0, 105.0, "yes", 5.0);
        let without_internship = student(7.0, 105.0, "no", 5.0);

        assert!(practical.matches(&with_internship));
        assert!(!technical.matches(&with_internship));
        assert!(!practical.matches(&without_internship));
        assert!(technical.matches(&without_internship));
    }

    #[test]
    fn test_academic_risk_disjunction() {
        let rule = RuleCatalog::standard().get(ESTUDIANTE_EN_RIESGO).cloned().unwrap();
        assert!(rule.matches(&student(5.5, 100.0, "no", 1.0)));
        assert!(!rule.matches(&student(7.0, 100.0, "no", 1.0)));

        let weak_prev = Fact::new(0)
            .with_number(Attribute::Cgpa, 6.5)
            .with_number(Attribute::PrevSemResult, 5.5)
            .with_number(Attribute::AcademicPerformance, 3.0);
        assert!(rule.matches(&weak_prev));
    }

    #[test]
    fn test_rules_do_not_inspect_identity() {
        for rule in RuleCatalog::standard().rules() {
            let attrs = rule.condition().attributes();
            assert!(!attrs.contains(&Attribute::CollegeId), "{} inspects College_ID", rule.name());
            assert!(!attrs.contains(&Attribute::Placement), "{} inspects the label", rule.name());
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let r = Rule::new("x", "X", Condition::gte(Attribute::Cgpa, 1.0));
        let err = RuleCatalog::from_rules(vec![r.clone(), r]).unwrap_err();
        assert_eq!(err, RuleError::DuplicateRule("x".into()));
        assert_eq!(err.code(), "PLACEMENT_DUPLICATE_RULE");
    }
}

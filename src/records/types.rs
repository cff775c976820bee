//! Student record types
//!
//! The attribute set is fixed to the placement dataset:
//! - College_ID: categorical identifier
//! - IQ, Prev_Sem_Result, CGPA, Academic_Performance,
//!   Extra_Curricular_Score, Communication_Skills, Projects_Completed: numeric
//! - Internship_Experience: yes/no
//! - Placement: yes/no, present only on labeled rows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a column holds numbers or categorical symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Numeric,
    Categorical,
}

impl AttributeKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::Numeric => "number",
            AttributeKind::Categorical => "string",
        }
    }
}

/// One column of the student dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "College_ID")]
    CollegeId,
    #[serde(rename = "IQ")]
    Iq,
    #[serde(rename = "Prev_Sem_Result")]
    PrevSemResult,
    #[serde(rename = "CGPA")]
    Cgpa,
    #[serde(rename = "Academic_Performance")]
    AcademicPerformance,
    #[serde(rename = "Internship_Experience")]
    InternshipExperience,
    #[serde(rename = "Extra_Curricular_Score")]
    ExtraCurricularScore,
    #[serde(rename = "Communication_Skills")]
    CommunicationSkills,
    #[serde(rename = "Projects_Completed")]
    ProjectsCompleted,
    #[serde(rename = "Placement")]
    Placement,
}

impl Attribute {
    /// All columns in dataset order
    pub const ALL: [Attribute; 10] = [
        Attribute::CollegeId,
        Attribute::Iq,
        Attribute::PrevSemResult,
        Attribute::Cgpa,
        Attribute::AcademicPerformance,
        Attribute::InternshipExperience,
        Attribute::ExtraCurricularScore,
        Attribute::CommunicationSkills,
        Attribute::ProjectsCompleted,
        Attribute::Placement,
    ];

    /// Columns the classifier is trained on, in training order.
    ///
    /// College_ID is an identifier and Placement is the label, so neither
    /// is a feature.
    pub const FEATURES: [Attribute; 8] = [
        Attribute::Iq,
        Attribute::PrevSemResult,
        Attribute::Cgpa,
        Attribute::AcademicPerformance,
        Attribute::InternshipExperience,
        Attribute::ExtraCurricularScore,
        Attribute::CommunicationSkills,
        Attribute::ProjectsCompleted,
    ];

    /// Returns the dataset column name
    pub fn column_name(&self) -> &'static str {
        match self {
            Attribute::CollegeId => "College_ID",
            Attribute::Iq => "IQ",
            Attribute::PrevSemResult => "Prev_Sem_Result",
            Attribute::Cgpa => "CGPA",
            Attribute::AcademicPerformance => "Academic_Performance",
            Attribute::InternshipExperience => "Internship_Experience",
            Attribute::ExtraCurricularScore => "Extra_Curricular_Score",
            Attribute::CommunicationSkills => "Communication_Skills",
            Attribute::ProjectsCompleted => "Projects_Completed",
            Attribute::Placement => "Placement",
        }
    }

    /// Looks up a column by its dataset name (exact match)
    pub fn from_column(name: &str) -> Option<Attribute> {
        Attribute::ALL.iter().copied().find(|a| a.column_name() == name)
    }

    /// Returns the value kind of this column
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::CollegeId | Attribute::InternshipExperience | Attribute::Placement => {
                AttributeKind::Categorical
            }
            _ => AttributeKind::Numeric,
        }
    }

    /// Returns true for numeric columns
    pub fn is_numeric(&self) -> bool {
        self.kind() == AttributeKind::Numeric
    }

    /// Returns true if every row must carry this column
    pub fn is_required(&self) -> bool {
        !matches!(self, Attribute::Placement)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Two-valued categorical flag (`"yes"` / `"no"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Parses a flag case-insensitively, ignoring surrounding whitespace
    pub fn parse(raw: &str) -> Option<YesNo> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }

    /// Canonical lower-case form
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

/// A single validated row of the dataset.
///
/// `index` equals the record's position in its `RecordStore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "College_ID")]
    pub college_id: String,
    #[serde(rename = "IQ")]
    pub iq: f64,
    #[serde(rename = "Prev_Sem_Result")]
    pub prev_sem_result: f64,
    #[serde(rename = "CGPA")]
    pub cgpa: f64,
    #[serde(rename = "Academic_Performance")]
    pub academic_performance: f64,
    #[serde(rename = "Internship_Experience")]
    pub internship_experience: YesNo,
    #[serde(rename = "Extra_Curricular_Score")]
    pub extra_curricular_score: f64,
    #[serde(rename = "Communication_Skills")]
    pub communication_skills: f64,
    #[serde(rename = "Projects_Completed")]
    pub projects_completed: f64,
    #[serde(rename = "Placement", skip_serializing_if = "Option::is_none")]
    pub placement: Option<YesNo>,
}

impl StudentRecord {
    /// Returns the value of a numeric column, `None` for categorical ones
    pub fn numeric(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Iq => Some(self.iq),
            Attribute::PrevSemResult => Some(self.prev_sem_result),
            Attribute::Cgpa => Some(self.cgpa),
            Attribute::AcademicPerformance => Some(self.academic_performance),
            Attribute::ExtraCurricularScore => Some(self.extra_curricular_score),
            Attribute::CommunicationSkills => Some(self.communication_skills),
            Attribute::ProjectsCompleted => Some(self.projects_completed),
            Attribute::CollegeId | Attribute::InternshipExperience | Attribute::Placement => None,
        }
    }

    /// Returns the value of a categorical column.
    ///
    /// `None` for numeric columns and for an unlabeled Placement.
    pub fn categorical(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::CollegeId => Some(self.college_id.as_str()),
            Attribute::InternshipExperience => Some(self.internship_experience.as_str()),
            Attribute::Placement => self.placement.map(|p| p.as_str()),
            _ => None,
        }
    }

    /// Returns true if the row carries a placement outcome
    pub fn is_labeled(&self) -> bool {
        self.placement.is_some()
    }
}

//! Shared builders for integration tests

#![allow(dead_code)]

use placement::encoding::{RawAttributes, RawValue};
use placement::records::{RecordStore, StudentRecord, YesNo};

/// Builder for a student record with middle-of-the-road defaults
pub struct StudentBuilder {
    record: StudentRecord,
}

pub fn student(index: usize) -> StudentBuilder {
    StudentBuilder {
        record: StudentRecord {
            index,
            college_id: format!("CLG{:04}", index),
            iq: 100.0,
            prev_sem_result: 7.0,
            cgpa: 7.0,
            academic_performance: 6.0,
            internship_experience: YesNo::No,
            extra_curricular_score: 5.0,
            communication_skills: 6.0,
            projects_completed: 2.0,
            placement: None,
        },
    }
}

impl StudentBuilder {
    pub fn iq(mut self, v: f64) -> Self {
        self.record.iq = v;
        self
    }

    pub fn cgpa(mut self, v: f64) -> Self {
        self.record.cgpa = v;
        self
    }

    pub fn prev_sem(mut self, v: f64) -> Self {
        self.record.prev_sem_result = v;
        self
    }

    pub fn projects(mut self, v: f64) -> Self {
        self.record.projects_completed = v;
        self
    }

    pub fn internship(mut self, yes: bool) -> Self {
        self.record.internship_experience = if yes { YesNo::Yes } else { YesNo::No };
        self
    }

    pub fn placed(mut self, yes: bool) -> Self {
        self.record.placement = Some(if yes { YesNo::Yes } else { YesNo::No });
        self
    }

    pub fn build(self) -> StudentRecord {
        self.record
    }
}

pub fn store(records: Vec<StudentRecord>) -> RecordStore {
    RecordStore::from_records(records).unwrap()
}

/// 100 labeled students: the first 60 placed with an internship and a
/// CGPA of 80 or more, the remaining 40 not placed, no internship, CGPA
/// below 80. Every other attribute is constant.
pub fn internship_dataset() -> RecordStore {
    let records = (0..100)
        .map(|i| {
            let builder = if i < 60 {
                student(i).internship(true).cgpa(80.0 + (i % 20) as f64).placed(true)
            } else {
                student(i).internship(false).cgpa(30.0 + (i % 45) as f64).placed(false)
            };
            builder.build()
        })
        .collect();
    store(records)
}

/// A complete raw attribute set matching the constant columns of
/// `internship_dataset`
pub fn raw_candidate(internship: &str, cgpa: f64) -> RawAttributes {
    let mut raw = RawAttributes::new();
    raw.insert("IQ".into(), RawValue::Number(100.0));
    raw.insert("Prev_Sem_Result".into(), RawValue::Number(7.0));
    raw.insert("CGPA".into(), RawValue::Number(cgpa));
    raw.insert("Academic_Performance".into(), RawValue::Number(6.0));
    raw.insert("Internship_Experience".into(), RawValue::Text(internship.into()));
    raw.insert("Extra_Curricular_Score".into(), RawValue::Number(5.0));
    raw.insert("Communication_Skills".into(), RawValue::Number(6.0));
    raw.insert("Projects_Completed".into(), RawValue::Number(2.0));
    raw
}

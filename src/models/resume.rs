use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeStatus {
    #[serde(rename = "NOT LOOKING FOR")]
    NotLookingFor,
    #[serde(rename = "CONSIDERING OFFER")]
    ConsideringOffer,
    #[serde(rename = "LOOKING FOR")]
    LookingFor,
}

impl ResumeStatus {
    pub const ALL: [ResumeStatus; 3] = [
        ResumeStatus::NotLookingFor,
        ResumeStatus::ConsideringOffer,
        ResumeStatus::LookingFor,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ResumeStatus::NotLookingFor => "NOT LOOKING FOR",
            ResumeStatus::ConsideringOffer => "CONSIDERING OFFER",
            ResumeStatus::LookingFor => "LOOKING FOR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResumeStatus::NotLookingFor => "Not looking for a job",
            ResumeStatus::ConsideringOffer => "Considering offers",
            ResumeStatus::LookingFor => "Looking for a job",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

impl fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ResumeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResumeStatus::from_code(s).ok_or_else(|| format!("unknown resume status '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    Trainee,
    Junior,
    Middle,
    Senior,
    Teamlead,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Trainee,
        Grade::Junior,
        Grade::Middle,
        Grade::Senior,
        Grade::Teamlead,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Grade::Trainee => "TRAINEE",
            Grade::Junior => "JUNIOR",
            Grade::Middle => "MIDDLE",
            Grade::Senior => "SENIOR",
            Grade::Teamlead => "TEAMLEAD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Trainee => "Trainee",
            Grade::Junior => "Junior",
            Grade::Middle => "Middle",
            Grade::Senior => "Senior",
            Grade::Teamlead => "Team lead",
        }
    }

    /// Form input accepts only the current codes.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|grade| grade.code() == code)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Stored rows may still carry the legacy "TEAMLED" spelling.
        if s == "TEAMLED" {
            return Ok(Grade::Teamlead);
        }
        Grade::from_code(s).ok_or_else(|| format!("unknown grade '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub status: ResumeStatus,
    pub salary: Option<i32>,
    pub grade: Grade,
    pub education: String,
    pub experience: String,
    pub portfolio: String,
    pub speciality_id: i64,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ResumeChanges {
    pub name: String,
    pub surname: String,
    pub status: ResumeStatus,
    pub salary: Option<i32>,
    pub grade: Grade,
    pub education: String,
    pub experience: String,
    pub portfolio: String,
    pub speciality_id: i64,
    pub user_id: i64,
}

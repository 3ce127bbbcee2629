//! Alumni directory record

use serde::{Deserialize, Serialize};

/// One entry of the alumni directory
///
/// Only `name`, `batch`, `company`, `location` and `industry` take part in
/// queries. The remaining fields are carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumnus {
    /// Stable identifier, unique within a roster
    pub id: u32,

    pub name: String,

    /// Graduation year
    pub batch: i32,

    pub company: String,

    pub location: String,

    pub industry: String,

    #[serde(default)]
    pub designation: String,

    #[serde(default)]
    pub degree: String,

    #[serde(default)]
    pub branch: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub skills: Vec<String>,
}

impl Alumnus {
    /// Create a record with only the query fields set
    pub fn new(
        id: u32,
        name: impl Into<String>,
        batch: i32,
        company: impl Into<String>,
        location: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            batch,
            company: company.into(),
            location: location.into(),
            industry: industry.into(),
            designation: String::new(),
            degree: String::new(),
            branch: String::new(),
            profile_pic: None,
            linkedin: None,
            email: String::new(),
            bio: String::new(),
            skills: Vec::new(),
        }
    }

    /// "Designation at Company", the one-line summary shown on directory cards
    pub fn headline(&self) -> String {
        if self.designation.is_empty() {
            self.company.clone()
        } else {
            format!("{} at {}", self.designation, self.company)
        }
    }
}

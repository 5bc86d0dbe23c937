//! Raw prediction input as collected by the form.

use serde::{Deserialize, Serialize};

/// Caller-supplied job attributes. Every field is a free-form string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub job_title: String,
    pub experience_level: String,
    /// Bucket label such as `"3-5"` or `"10+"`.
    pub years_experience: String,
    pub employment_type: String,
    /// Percentage of remote work, e.g. `"50"`.
    pub remote_work: String,
    pub company_size: String,
    pub country: String,
    pub industry: String,
    pub education: String,
}

/// A field of [`PredictionRequest`], addressable from static feature tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    JobTitle,
    ExperienceLevel,
    YearsExperience,
    EmploymentType,
    RemoteWork,
    CompanySize,
    Country,
    Industry,
    Education,
}

impl RequestField {
    /// All fields in request declaration order.
    pub const ALL: [RequestField; 9] = [
        Self::JobTitle,
        Self::ExperienceLevel,
        Self::YearsExperience,
        Self::EmploymentType,
        Self::RemoteWork,
        Self::CompanySize,
        Self::Country,
        Self::Industry,
        Self::Education,
    ];

    /// JSON (and Arrow column) name of the field.
    pub fn json_name(self) -> &'static str {
        match self {
            Self::JobTitle => "jobTitle",
            Self::ExperienceLevel => "experienceLevel",
            Self::YearsExperience => "yearsExperience",
            Self::EmploymentType => "employmentType",
            Self::RemoteWork => "remoteWork",
            Self::CompanySize => "companySize",
            Self::Country => "country",
            Self::Industry => "industry",
            Self::Education => "education",
        }
    }

    pub fn value(self, request: &PredictionRequest) -> &str {
        match self {
            Self::JobTitle => &request.job_title,
            Self::ExperienceLevel => &request.experience_level,
            Self::YearsExperience => &request.years_experience,
            Self::EmploymentType => &request.employment_type,
            Self::RemoteWork => &request.remote_work,
            Self::CompanySize => &request.company_size,
            Self::Country => &request.country,
            Self::Industry => &request.industry,
            Self::Education => &request.education,
        }
    }

    pub fn value_mut(self, request: &mut PredictionRequest) -> &mut String {
        match self {
            Self::JobTitle => &mut request.job_title,
            Self::ExperienceLevel => &mut request.experience_level,
            Self::YearsExperience => &mut request.years_experience,
            Self::EmploymentType => &mut request.employment_type,
            Self::RemoteWork => &mut request.remote_work,
            Self::CompanySize => &mut request.company_size,
            Self::Country => &mut request.country,
            Self::Industry => &mut request.industry,
            Self::Education => &mut request.education,
        }
    }
}

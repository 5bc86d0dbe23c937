//! The salary model's feature layout.
//!
//! Standardization constants and level lists must match the preprocessor the
//! deployed model was trained with; replace them together with the model.
//! Levels are in the encoder's sorted order and the first level of each
//! categorical feature is the dropped reference.

use crate::request::RequestField;
use crate::spec::{CategoricalFeature, FeatureSpec, NumericFeature, NumericSource};

/// Input width of the served salary model.
pub const SALARY_FEATURE_WIDTH: usize = 90;

const NUMERIC: [NumericFeature; 27] = [
    NumericFeature::collected(
        "remote_ratio",
        NumericSource::RemoteWorkPercent,
        0.498_533,
        0.408_519,
    ),
    NumericFeature::collected(
        "years_experience",
        NumericSource::YearsExperienceBucket,
        6.253_267,
        5.545_310,
    ),
    // Skills are not collected by the form.
    NumericFeature::defaulted("skill_AWS", 0.1812, 0.385184),
    NumericFeature::defaulted("skill_Azure", 0.1406, 0.347608),
    NumericFeature::defaulted("skill_Computer Vision", 0.1175, 0.322015),
    NumericFeature::defaulted("skill_Data Visualization", 0.1283, 0.334424),
    NumericFeature::defaulted("skill_Deep Learning", 0.2011, 0.400823),
    NumericFeature::defaulted("skill_Docker", 0.1694, 0.375105),
    NumericFeature::defaulted("skill_GCP", 0.1327, 0.339250),
    NumericFeature::defaulted("skill_Git", 0.1398, 0.346779),
    NumericFeature::defaulted("skill_Hadoop", 0.1189, 0.323671),
    NumericFeature::defaulted("skill_Java", 0.1362, 0.343001),
    NumericFeature::defaulted("skill_Kubernetes", 0.1702, 0.375808),
    NumericFeature::defaulted("skill_Linux", 0.1488, 0.355891),
    NumericFeature::defaulted("skill_MLOps", 0.1583, 0.365022),
    NumericFeature::defaulted("skill_Mathematics", 0.1731, 0.378334),
    NumericFeature::defaulted("skill_NLP", 0.1716, 0.377032),
    NumericFeature::defaulted("skill_PyTorch", 0.2047, 0.403482),
    NumericFeature::defaulted("skill_Python", 0.3614, 0.480406),
    NumericFeature::defaulted("skill_R", 0.1395, 0.346468),
    NumericFeature::defaulted("skill_SQL", 0.2522, 0.434275),
    NumericFeature::defaulted("skill_Scala", 0.1204, 0.325429),
    NumericFeature::defaulted("skill_Spark", 0.1536, 0.360565),
    NumericFeature::defaulted("skill_Statistics", 0.1489, 0.355990),
    NumericFeature::defaulted("skill_Tableau", 0.1211, 0.326243),
    NumericFeature::defaulted("skill_TensorFlow", 0.2009, 0.400673),
    NumericFeature::defaulted("skill_count", 3.9904, 1.117_032),
];

const JOB_TITLES: &[&str] = &[
    "AI Architect",
    "AI Consultant",
    "AI Product Manager",
    "AI Research Scientist",
    "AI Software Engineer",
    "AI Specialist",
    "Autonomous Systems Engineer",
    "Computer Vision Engineer",
    "Data Analyst",
    "Data Engineer",
    "Data Scientist",
    "Deep Learning Engineer",
    "Head of AI",
    "ML Ops Engineer",
    "Machine Learning Engineer",
    "Machine Learning Researcher",
    "NLP Engineer",
    "Principal Data Scientist",
    "Research Scientist",
    "Robotics Engineer",
];

const COUNTRIES: &[&str] = &[
    "Australia",
    "Austria",
    "Canada",
    "China",
    "Denmark",
    "Finland",
    "France",
    "Germany",
    "India",
    "Ireland",
    "Israel",
    "Japan",
    "Netherlands",
    "Norway",
    "Singapore",
    "South Korea",
    "Sweden",
    "Switzerland",
    "United Kingdom",
    "United States",
];

const INDUSTRIES: &[&str] = &[
    "Automotive",
    "Consulting",
    "Education",
    "Energy",
    "Finance",
    "Gaming",
    "Government",
    "Healthcare",
    "Manufacturing",
    "Media",
    "Real Estate",
    "Retail",
    "Technology",
    "Telecommunications",
    "Transportation",
];

const CATEGORICAL: [CategoricalFeature; 7] = [
    CategoricalFeature {
        name: "job_title",
        field: RequestField::JobTitle,
        levels: JOB_TITLES,
    },
    CategoricalFeature {
        name: "experience_level",
        field: RequestField::ExperienceLevel,
        levels: &["EN", "EX", "MI", "SE"],
    },
    CategoricalFeature {
        name: "employment_type",
        field: RequestField::EmploymentType,
        levels: &["CT", "FL", "FT", "PT"],
    },
    CategoricalFeature {
        name: "company_location",
        field: RequestField::Country,
        levels: COUNTRIES,
    },
    CategoricalFeature {
        name: "company_size",
        field: RequestField::CompanySize,
        levels: &["L", "M", "S"],
    },
    CategoricalFeature {
        name: "education_required",
        field: RequestField::Education,
        levels: &["Associate", "Bachelor", "Master", "PhD"],
    },
    CategoricalFeature {
        name: "industry",
        field: RequestField::Industry,
        levels: INDUSTRIES,
    },
];

const LAYOUT: FeatureSpec = FeatureSpec {
    name: "salary-v1",
    numeric: &NUMERIC,
    categorical: &CATEGORICAL,
    width: SALARY_FEATURE_WIDTH,
};

const _: () = assert!(LAYOUT.computed_width() == SALARY_FEATURE_WIDTH);

/// Feature layout of the salary regressor.
pub static SALARY_SPEC: FeatureSpec = LAYOUT;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_spec_is_valid() {
        SALARY_SPEC.validate().unwrap();
        assert_eq!(SALARY_SPEC.width(), 90);
        assert_eq!(SALARY_SPEC.numeric_width(), 27);
        assert_eq!(SALARY_SPEC.indicator_width(), 63);
        assert_eq!(SALARY_SPEC.feature_names().len(), 90);
    }

    #[test]
    fn numeric_order_matches_training_frame() {
        let names: Vec<&str> = SALARY_SPEC.numeric.iter().map(|f| f.name).collect();
        assert_eq!(names[0], "remote_ratio");
        assert_eq!(names[1], "years_experience");
        assert_eq!(names[2], "skill_AWS");
        assert_eq!(names[25], "skill_TensorFlow");
        assert_eq!(names[26], "skill_count");
    }

    #[test]
    fn only_two_numeric_slots_are_collected() {
        let collected: Vec<&str> = SALARY_SPEC
            .numeric
            .iter()
            .filter(|f| !matches!(f.source, NumericSource::Fixed(_)))
            .map(|f| f.name)
            .collect();
        assert_eq!(collected, vec!["remote_ratio", "years_experience"]);
    }

    #[test]
    fn categorical_traversal_order() {
        let names: Vec<&str> = SALARY_SPEC.categorical.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "job_title",
                "experience_level",
                "employment_type",
                "company_location",
                "company_size",
                "education_required",
                "industry",
            ]
        );
    }

    #[test]
    fn levels_are_sorted() {
        for feature in SALARY_SPEC.categorical {
            let mut sorted = feature.levels.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, feature.levels, "{} levels out of order", feature.name);
        }
    }

    #[test]
    fn company_size_block_position() {
        assert_eq!(SALARY_SPEC.indicator_block("company_size"), Some(71..73));
        let names = SALARY_SPEC.feature_names();
        assert_eq!(names[71], "company_size_M");
        assert_eq!(names[72], "company_size_S");
        assert_eq!(names[89], "industry_Transportation");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scored category of a candidate/role match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Skills,
    Experience,
    Education,
    Location,
    Salary,
    Culture,
    Reliability,
}

/// Base weights before renormalization. Sums to 1.10 with reliability present.
pub const BASE_WEIGHTS: [(Category, f64); 7] = [
    (Category::Skills, 0.30),
    (Category::Experience, 0.25),
    (Category::Education, 0.15),
    (Category::Location, 0.10),
    (Category::Salary, 0.10),
    (Category::Culture, 0.10),
    (Category::Reliability, 0.10),
];

impl Category {
    /// All categories in weight-table order
    pub const ALL: [Category; 7] = [
        Category::Skills,
        Category::Experience,
        Category::Education,
        Category::Location,
        Category::Salary,
        Category::Culture,
        Category::Reliability,
    ];

    pub fn base_weight(self) -> f64 {
        BASE_WEIGHTS
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Field name as it appears in breakdown files
    pub fn key(self) -> &'static str {
        match self {
            Category::Skills => "skills",
            Category::Experience => "experience",
            Category::Education => "education",
            Category::Location => "location",
            Category::Salary => "salary",
            Category::Culture => "culture",
            Category::Reliability => "reliability",
        }
    }

    /// Human label for detailed output
    pub fn label(self) -> &'static str {
        match self {
            Category::Skills => "Skills",
            Category::Experience => "Experience",
            Category::Education => "Education",
            Category::Location => "Location",
            Category::Salary => "Salary",
            Category::Culture => "Culture",
            Category::Reliability => "Reliability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

use serde::{Deserialize, Serialize};

use super::factors::Category;

pub const MIN_SUB_SCORE: f64 = 0.0;
pub const MAX_SUB_SCORE: f64 = 100.0;

/// Neutral reliability used by the explanation rules when none was recorded.
pub const NEUTRAL_RELIABILITY: f64 = 50.0;

/// Per-category sub-scores for one candidate against one role.
///
/// Each value is conventionally in [0, 100]. `reliability` is optional: when
/// absent it carries no weight during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Breakdown {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
    pub salary: f64,
    pub culture: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliability: Option<f64>,
}

impl Breakdown {
    /// Value for a category, `None` if the category is absent.
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Skills => Some(self.skills),
            Category::Experience => Some(self.experience),
            Category::Education => Some(self.education),
            Category::Location => Some(self.location),
            Category::Salary => Some(self.salary),
            Category::Culture => Some(self.culture),
            Category::Reliability => self.reliability,
        }
    }

    fn slot_mut(&mut self, category: Category) -> Option<&mut f64> {
        match category {
            Category::Skills => Some(&mut self.skills),
            Category::Experience => Some(&mut self.experience),
            Category::Education => Some(&mut self.education),
            Category::Location => Some(&mut self.location),
            Category::Salary => Some(&mut self.salary),
            Category::Culture => Some(&mut self.culture),
            Category::Reliability => self.reliability.as_mut(),
        }
    }

    /// Present categories with their values, in weight-table order
    pub fn present(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|v| (c, v)))
    }

    /// Reliability with the neutral midpoint substituted when absent
    pub fn reliability_or_neutral(&self) -> f64 {
        self.reliability.unwrap_or(NEUTRAL_RELIABILITY)
    }

    /// Copy with every value forced into [0, 100]. NaN reads as 0.
    ///
    /// Returns the adjusted breakdown plus the categories that changed.
    pub fn clamped(&self) -> (Breakdown, Vec<Category>) {
        let mut out = *self;
        let mut adjusted = Vec::new();
        for category in Category::ALL {
            if let Some(slot) = out.slot_mut(category) {
                let fixed = clamp_sub_score(*slot);
                if fixed != *slot {
                    *slot = fixed;
                    adjusted.push(category);
                }
            }
        }
        (out, adjusted)
    }
}

fn clamp_sub_score(value: f64) -> f64 {
    if value.is_nan() {
        MIN_SUB_SCORE
    } else {
        value.clamp(MIN_SUB_SCORE, MAX_SUB_SCORE)
    }
}

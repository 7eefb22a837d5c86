use super::breakdown::Breakdown;

pub const STRONG_SKILLS: &str = "Strong skills alignment";
pub const EXPERIENCE_MATCH: &str = "Experience closely matches role level";
pub const LOW_COMPENSATION: &str = "Compensation may be below your target";
pub const RELIABLE: &str = "Reliability record boosts ranking";
pub const LOCATION_MISMATCH: &str = "Commute/location may be a mismatch";

struct Rule {
    applies: fn(&Breakdown) -> bool,
    message: &'static str,
}

fn strong_skills(b: &Breakdown) -> bool {
    b.skills >= 80.0
}

fn experience_match(b: &Breakdown) -> bool {
    b.experience >= 80.0
}

fn low_compensation(b: &Breakdown) -> bool {
    b.salary < 50.0
}

fn reliable(b: &Breakdown) -> bool {
    b.reliability_or_neutral() >= 70.0
}

fn location_mismatch(b: &Breakdown) -> bool {
    b.location < 50.0
}

// Emission order is the order of this table.
static RULES: [Rule; 5] = [
    Rule { applies: strong_skills, message: STRONG_SKILLS },
    Rule { applies: experience_match, message: EXPERIENCE_MATCH },
    Rule { applies: low_compensation, message: LOW_COMPENSATION },
    Rule { applies: reliable, message: RELIABLE },
    Rule { applies: location_mismatch, message: LOCATION_MISMATCH },
];

/// Lazily evaluate the explanation rules. Each call starts a fresh pass.
pub fn explanations(breakdown: &Breakdown) -> impl Iterator<Item = &'static str> + '_ {
    RULES
        .iter()
        .filter(move |rule| (rule.applies)(breakdown))
        .map(|rule| rule.message)
}

/// Human-readable observations about a breakdown, in fixed rule order.
pub fn explain(breakdown: &Breakdown) -> Vec<String> {
    explanations(breakdown).map(str::to_string).collect()
}

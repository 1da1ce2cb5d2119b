//! Candidate sourcing — the capability the session controller depends on
//! for its candidate list.
//!
//! The controller only needs "provide an ordered sequence of candidates".
//! The built-in [`FixtureSource`] serves a fixed roster; a real search or
//! match service can be swapped in without touching controller logic.

use crate::models::Candidate;

/// Provides the ordered candidate list a session starts from.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self) -> Vec<Candidate>;
}

/// The built-in fixed roster.
pub struct FixtureSource;

impl CandidateSource for FixtureSource {
    fn candidates(&self) -> Vec<Candidate> {
        fixture_candidates()
    }
}

fn fixture_candidates() -> Vec<Candidate> {
    let rows: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
        (
            "100",
            "Shash",
            "shashankyadav4858@gmail.com",
            "Delhi",
            "Masters",
            "5",
            "AI Engineer with 5 years of experience in machine learning and data science.",
        ),
        (
            "200",
            "Shashwat",
            "shashwat1606@gmail.com",
            "Bangalore",
            "Bachelors",
            "5",
            "Investment banker with 5 years of experience in financial analysis and portfolio management.",
        ),
        (
            "300",
            "Vertika",
            "Vertika@atypicaladvantage.in",
            "Mumbai",
            "Masters",
            "3",
            "Recruiter with 3 years of experience in talent acquisition and human resources.",
        ),
        (
            "400",
            "Preeti",
            "Preeti@atypicaladvantage.in",
            "Hyderabad",
            "Bachelors",
            "4",
            "Recruiter with 4 years of experience in recruitment and talent management.",
        ),
        (
            "500",
            "Talent Onboarding",
            "talentonboarding@atypicaladvantage.in",
            "Chennai",
            "Masters",
            "6",
            "Expert in talent onboarding with 6 years of experience in employee integration and training.",
        ),
        (
            "600",
            "Juhi",
            "juhi@atypicaladvantage.in",
            "Pune",
            "Bachelors",
            "2",
            "Top recruiter with 3 years of experience in sourcing and hiring top talent.",
        ),
    ];

    rows.iter()
        .map(
            |(id, name, email, location, education, experience, summary)| Candidate {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                location_preference: location.to_string(),
                disability: "None".to_string(),
                educational_qualification: education.to_string(),
                work_experience: experience.to_string(),
                summary: summary.to_string(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_fixture_has_six_candidates() {
        assert_eq!(FixtureSource.candidates().len(), 6);
    }

    #[test]
    fn test_fixture_emails_are_unique() {
        let candidates = FixtureSource.candidates();
        let emails: BTreeSet<&str> = candidates.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), candidates.len());
    }

    #[test]
    fn test_fixture_order_is_stable() {
        let first = FixtureSource.candidates();
        let second = FixtureSource.candidates();
        assert_eq!(first, second);
        assert_eq!(first[0].id, "100");
        assert_eq!(first[5].id, "600");
    }
}

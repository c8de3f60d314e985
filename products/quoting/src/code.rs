use std::fmt;

use chrono::Datelike;
use entity::proposal;

/// Human-facing proposal code such as `007/242` or `007/242-OP 1`: padded
/// sequence number, two-digit creation year, revision, and option suffix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProposalCode {
    sequence: i32,
    year: i32,
    revision: i32,
    option: Option<i32>,
}

impl ProposalCode {
    pub fn new(sequence: i32, year: i32, revision: i32, option: Option<i32>) -> Self {
        Self {
            sequence,
            year,
            revision,
            option: option.filter(|opt| *opt > 0),
        }
    }

    pub fn for_proposal(model: &proposal::Model) -> Self {
        Self::new(
            model.sequence_number,
            model.created_at.year(),
            model.revision_number,
            model.option_number,
        )
    }
}

impl fmt::Display for ProposalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}/{:02}{}",
            self.sequence,
            self.year.rem_euclid(100),
            self.revision
        )?;
        if let Some(option) = self.option {
            write!(f, "-OP {option}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_padded_sequence_year_and_revision() {
        assert_eq!(ProposalCode::new(7, 2024, 2, None).to_string(), "007/242");
    }

    #[test]
    fn option_adds_suffix() {
        assert_eq!(
            ProposalCode::new(7, 2024, 2, Some(1)).to_string(),
            "007/242-OP 1"
        );
    }

    #[test]
    fn zero_option_is_ignored() {
        assert_eq!(ProposalCode::new(7, 2024, 0, Some(0)).to_string(), "007/240");
    }

    #[test]
    fn wide_sequences_and_early_years_keep_their_digits() {
        assert_eq!(ProposalCode::new(1234, 2005, 0, None).to_string(), "1234/050");
    }
}

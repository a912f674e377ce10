use crate::domain::{DateRange, SponsorQuery};

/// Registry `query.term` matching any of `sponsors` updated within `range`.
pub fn search_term(sponsors: &SponsorQuery, range: &DateRange) -> String {
    format!(
        "({}) AND {}",
        sponsors.filter_clause(),
        range.filter_clause()
    )
}

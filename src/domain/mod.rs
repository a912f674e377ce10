mod date_range;
mod search_term;
mod sponsor_query;
mod study_record;

pub use date_range::DateRange;
pub use search_term::search_term;
pub use sponsor_query::SponsorQuery;
pub use study_record::{StudyRecord, StudyResults, NO_NEW_STUDIES};

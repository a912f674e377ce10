use serde::{Deserialize, Serialize};

pub const NO_NEW_STUDIES: &str = "No new studies found.";

const STUDY_LINK_BASE: &str = "https://clinicaltrials.gov/study/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    pub nct_id: String,
    pub lead_sponsor: String,
    pub link: String,
}

impl StudyRecord {
    /// Returns `None` for studies without an NCT identifier.
    pub fn new(nct_id: String, lead_sponsor: String) -> Option<Self> {
        if nct_id.is_empty() {
            return None;
        }

        let link = format!("{}{}", STUDY_LINK_BASE, nct_id);
        Some(Self {
            nct_id,
            lead_sponsor,
            link,
        })
    }
}

/// The `results` field of a lookup response: the matches, or a fixed message
/// when there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudyResults {
    Found(Vec<StudyRecord>),
    NoneFound(String),
}

impl From<Vec<StudyRecord>> for StudyResults {
    fn from(records: Vec<StudyRecord>) -> Self {
        match records.is_empty() {
            true => StudyResults::NoneFound(NO_NEW_STUDIES.to_string()),
            false => StudyResults::Found(records),
        }
    }
}

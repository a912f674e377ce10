/// Lead sponsor names taken from a comma-separated list, trimmed, in input order.
#[derive(Debug, Clone)]
pub struct SponsorQuery(Vec<String>);

impl SponsorQuery {
    pub fn parse(s: &str) -> Result<Self, String> {
        let sponsors: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|sponsor| !sponsor.is_empty())
            .map(String::from)
            .collect();

        match sponsors.is_empty() {
            true => Err("No sponsors provided.".to_string()),
            false => Ok(Self(sponsors)),
        }
    }

    /// `AREA[LeadSponsor]"<name>"` clauses joined with ` OR `.
    ///
    /// Whitespace inside a name is dropped, so "Acme Corp" is searched as "AcmeCorp".
    pub fn filter_clause(&self) -> String {
        self.0
            .iter()
            .map(|sponsor| {
                let name: String = sponsor.split_whitespace().collect();
                format!(r#"AREA[LeadSponsor]"{}""#, name)
            })
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

impl AsRef<[String]> for SponsorQuery {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

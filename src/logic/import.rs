//! Team registration from a CSV list: one team per row, name in the first column.

use crate::models::TournamentError;
use std::io::Read;

/// Read team names from CSV. An optional `name` header row and blank names are skipped.
pub fn parse_team_names<R: Read>(reader: R) -> Result<Vec<String>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| TournamentError::Import(e.to_string()))?;
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() || (row == 0 && name.eq_ignore_ascii_case("name")) {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

//! Tournament listing: status partition, name search, limit.

use crate::models::{Tournament, TournamentStatus, TournamentSummary};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TournamentFilter {
    #[serde(default)]
    pub status: Option<TournamentStatus>,
    /// Case-insensitive substring of the name.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TournamentFilter {
    fn matches(&self, t: &Tournament, today: NaiveDate) -> bool {
        if let Some(status) = self.status {
            if t.status(today) != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => t.name.to_lowercase().contains(&q.to_lowercase()),
            _ => true,
        }
    }
}

/// Filter and order tournaments as of `today`.
///
/// Ended tournaments come most recent first; everything else by start date, then name.
pub fn list_tournaments(
    tournaments: Vec<Tournament>,
    filter: &TournamentFilter,
    today: NaiveDate,
) -> Vec<TournamentSummary> {
    let mut selected: Vec<Tournament> = tournaments
        .into_iter()
        .filter(|t| filter.matches(t, today))
        .collect();
    if filter.status == Some(TournamentStatus::Recent) {
        selected.sort_by(|a, b| b.date_to.cmp(&a.date_to).then_with(|| a.name.cmp(&b.name)));
    } else {
        selected.sort_by(|a, b| a.date_from.cmp(&b.date_from).then_with(|| a.name.cmp(&b.name)));
    }
    selected
        .iter()
        .take(filter.limit.unwrap_or(usize::MAX))
        .map(Tournament::summary)
        .collect()
}

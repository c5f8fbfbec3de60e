use serde::Serialize;

/// One leaderboard row: a distinct roast and how often it was chosen.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub roast: String,
    pub count: usize,
}

/// Tallies roast occurrences into a ranking, most frequent first.
/// Ties keep first-seen order (the sort is stable and rows are built in
/// order of first appearance).
pub fn compute(occurrences: &[String]) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = Vec::new();

    for roast in occurrences {
        match rows.iter_mut().find(|row| row.roast == *roast) {
            Some(row) => row.count += 1,
            None => rows.push(LeaderboardRow {
                roast: roast.clone(),
                count: 1,
            }),
        }
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

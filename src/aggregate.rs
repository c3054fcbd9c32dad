//! Display-ready aggregates over raw platform rows.
//!
//! Every function is total: empty or partial input degrades to a zero-valued
//! aggregate, never a panic.

use crate::model::{EventLevel, ProgressRecord, Transaction};

pub fn total_xp(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|tx| tx.amount).sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectXp {
    pub name: String,
    pub amount: i64,
}

/// Groups XP by the final path segment, preserving first-encountered order.
pub fn xp_by_project(transactions: &[Transaction]) -> Vec<ProjectXp> {
    let mut grouped: Vec<ProjectXp> = Vec::new();
    for tx in transactions {
        let name = tx.path_tail();
        match grouped.iter_mut().find(|p| p.name == name) {
            Some(entry) => entry.amount += tx.amount,
            None => grouped.push(ProjectXp {
                name: name.to_string(),
                amount: tx.amount,
            }),
        }
    }
    grouped
}

/// Top n projects by summed XP. The sort is stable, so equal amounts keep
/// their first-encountered order.
pub fn top_projects(transactions: &[Transaction], n: usize) -> Vec<ProjectXp> {
    let mut grouped = xp_by_project(transactions);
    grouped.sort_by(|a, b| b.amount.cmp(&a.amount));
    grouped.truncate(n);
    grouped
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassFail {
    pub pass: u32,
    pub fail: u32,
}

impl PassFail {
    pub fn total(&self) -> u32 {
        self.pass + self.fail
    }

    pub fn rate_pct(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.pass as f64 / self.total() as f64 * 100.0
        }
    }
}

/// Grade 1 is a pass, 0 a fail; any other grade (or none) counts as neither.
pub fn pass_fail(records: &[ProgressRecord]) -> PassFail {
    let mut counts = PassFail::default();
    for rec in records {
        match rec.grade {
            Some(g) if g == 1.0 => counts.pass += 1,
            Some(g) if g == 0.0 => counts.fail += 1,
            _ => {}
        }
    }
    counts
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditStats {
    pub up: u32,
    pub down: u32,
}

impl AuditStats {
    pub fn total(&self) -> u32 {
        self.up + self.down
    }

    pub fn ratio_pct(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.up as f64 / self.total() as f64 * 100.0
        }
    }
}

/// Up/down vote counts derived from audit transactions. This is the single
/// audit-ratio source; the server's precomputed field is not consulted.
pub fn audit_stats(transactions: &[Transaction]) -> AuditStats {
    let mut stats = AuditStats::default();
    for tx in transactions {
        match tx.kind.as_str() {
            "up" => stats.up += 1,
            "down" => stats.down += 1,
            _ => {}
        }
    }
    stats
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub amount: i64,
}

/// First n rows in server order; the skills query already sorts by most
/// recent progress.
pub fn top_skills(transactions: &[Transaction], n: usize) -> Vec<Skill> {
    transactions
        .iter()
        .take(n)
        .map(|tx| Skill {
            name: tx.path_tail().to_string(),
            amount: tx.amount,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hackathon,
    WebDev,
    Ai,
    Other,
}

impl Category {
    pub fn from_event_id(id: i64) -> Self {
        match id {
            72 => Category::Hackathon,
            20 => Category::WebDev,
            250 => Category::Ai,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hackathon => "Hackathon",
            Category::WebDev => "Web Dev",
            Category::Ai => "AI",
            Category::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLevel {
    pub category: Category,
    pub level: i64,
}

/// Highest level seen per category, in first-appearance order.
pub fn levels_by_category(records: &[EventLevel]) -> Vec<CategoryLevel> {
    let mut levels: Vec<CategoryLevel> = Vec::new();
    for rec in records {
        let category = Category::from_event_id(rec.event_id);
        match levels.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.level = entry.level.max(rec.level),
            None => levels.push(CategoryLevel {
                category,
                level: rec.level,
            }),
        }
    }
    levels
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthXp {
    pub month: String,
    pub xp: i64,
}

/// Buckets XP by short month name in first-appearance order. With the XP
/// query ordered by createdAt this tracks the calendar, but same-named
/// months from different years collapse into one bucket.
/// TODO: decide whether buckets should key on (year, month) instead.
pub fn monthly_xp(transactions: &[Transaction]) -> Vec<MonthXp> {
    let mut buckets: Vec<MonthXp> = Vec::new();
    for tx in transactions {
        let Some(created) = tx.created() else { continue };
        let month = created.format("%b").to_string();
        match buckets.iter_mut().find(|b| b.month == month) {
            Some(entry) => entry.xp += tx.amount,
            None => buckets.push(MonthXp {
                month,
                xp: tx.amount,
            }),
        }
    }
    buckets
}

/// Running XP total in input order; feeds the cumulative line chart.
pub fn cumulative_xp(transactions: &[Transaction]) -> Vec<i64> {
    let mut running = 0;
    transactions
        .iter()
        .map(|tx| {
            running += tx.amount;
            running
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: i64, path: &str) -> Transaction {
        Transaction {
            amount,
            path: path.to_string(),
            ..Transaction::default()
        }
    }

    fn tx_at(amount: i64, created_at: &str) -> Transaction {
        Transaction {
            amount,
            created_at: created_at.to_string(),
            ..Transaction::default()
        }
    }

    fn vote(kind: &str) -> Transaction {
        Transaction {
            kind: kind.to_string(),
            ..Transaction::default()
        }
    }

    fn graded(grade: Option<f64>) -> ProgressRecord {
        ProgressRecord {
            grade,
            ..ProgressRecord::default()
        }
    }

    #[test]
    fn test_total_xp_sums_amounts() {
        let txs = vec![tx(100, "/a"), tx(250, "/b")];
        assert_eq!(total_xp(&txs), 350);
    }

    #[test]
    fn test_total_xp_order_independent() {
        let fwd = vec![tx(10, "/a"), tx(20, "/b"), tx(30, "/c")];
        let rev: Vec<_> = fwd.iter().rev().cloned().collect();
        assert_eq!(total_xp(&fwd), total_xp(&rev));
    }

    #[test]
    fn test_total_xp_empty_is_zero() {
        assert_eq!(total_xp(&[]), 0);
    }

    #[test]
    fn test_xp_by_project_groups_path_tails() {
        let txs = vec![
            tx(100, "/bh/module/go-reloaded"),
            tx(50, "/bh/module/ascii-art"),
            tx(25, "/bh/piscine/go-reloaded"),
        ];
        let grouped = xp_by_project(&txs);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].name, "go-reloaded");
        assert_eq!(grouped[0].amount, 125);
        assert_eq!(grouped[1].name, "ascii-art");
    }

    #[test]
    fn test_top_projects_descending_and_bounded() {
        let txs = vec![
            tx(10, "/m/small"),
            tx(500, "/m/big"),
            tx(200, "/m/mid"),
            tx(1, "/m/tiny"),
        ];
        let top = top_projects(&txs, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].name, "big");
        assert_eq!(top[1].name, "mid");
        assert_eq!(top[2].name, "small");
    }

    #[test]
    fn test_top_projects_tie_keeps_insertion_order() {
        let txs = vec![tx(100, "/m/first"), tx(100, "/m/second")];
        let top = top_projects(&txs, 2);
        assert_eq!(top[0].name, "first");
        assert_eq!(top[1].name, "second");
    }

    #[test]
    fn test_top_projects_output_is_subset_of_input_tails() {
        let txs = vec![tx(5, "/m/a"), tx(9, "/m/b"), tx(2, "/m/c")];
        let tails: Vec<&str> = txs.iter().map(|t| t.path_tail()).collect();
        for p in top_projects(&txs, 2) {
            assert!(tails.contains(&p.name.as_str()));
        }
    }

    #[test]
    fn test_pass_fail_counts_and_rate() {
        let records = vec![graded(Some(1.0)), graded(Some(1.0)), graded(Some(0.0))];
        let counts = pass_fail(&records);
        assert_eq!(counts.pass, 2);
        assert_eq!(counts.fail, 1);
        assert!((counts.rate_pct() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_pass_fail_excludes_other_grades() {
        let records = vec![graded(Some(1.0)), graded(Some(0.5)), graded(None)];
        let counts = pass_fail(&records);
        assert_eq!(counts.pass, 1);
        assert_eq!(counts.fail, 0);
    }

    #[test]
    fn test_pass_rate_empty_is_zero() {
        assert_eq!(pass_fail(&[]).rate_pct(), 0.0);
    }

    #[test]
    fn test_pass_rate_within_bounds() {
        let records = vec![graded(Some(1.0)), graded(Some(0.0)), graded(Some(0.0))];
        let rate = pass_fail(&records).rate_pct();
        assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn test_audit_ratio_all_up() {
        let stats = audit_stats(&[vote("up"), vote("up")]);
        assert_eq!(stats.ratio_pct(), 100.0);
    }

    #[test]
    fn test_audit_ratio_all_down() {
        let stats = audit_stats(&[vote("down")]);
        assert_eq!(stats.ratio_pct(), 0.0);
    }

    #[test]
    fn test_audit_ratio_empty_is_zero() {
        assert_eq!(audit_stats(&[]).ratio_pct(), 0.0);
    }

    #[test]
    fn test_audit_ratio_mixed() {
        let stats = audit_stats(&[vote("up"), vote("down"), vote("up"), vote("up")]);
        assert_eq!(stats.up, 3);
        assert_eq!(stats.down, 1);
        assert_eq!(stats.ratio_pct(), 75.0);
    }

    #[test]
    fn test_top_skills_takes_server_order() {
        let txs = vec![
            tx(55, "/skills/go"),
            tx(40, "/skills/js"),
            tx(70, "/skills/sql"),
        ];
        let skills = top_skills(&txs, 2);
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "go");
        assert_eq!(skills[1].name, "js");
    }

    #[test]
    fn test_levels_by_category_mapping_and_max() {
        let records = vec![
            EventLevel { user_id: 1, event_id: 72, level: 3 },
            EventLevel { user_id: 1, event_id: 20, level: 12 },
            EventLevel { user_id: 1, event_id: 72, level: 9 },
            EventLevel { user_id: 1, event_id: 999, level: 4 },
            EventLevel { user_id: 1, event_id: 250, level: 2 },
        ];
        let levels = levels_by_category(&records);
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[0].category, Category::Hackathon);
        assert_eq!(levels[0].level, 9);
        assert_eq!(levels[1].category, Category::WebDev);
        assert_eq!(levels[2].category, Category::Other);
        assert_eq!(levels[3].category, Category::Ai);
    }

    #[test]
    fn test_monthly_xp_buckets_in_first_appearance_order() {
        let txs = vec![
            tx_at(100, "2024-01-10T00:00:00+00:00"),
            tx_at(50, "2024-01-20T00:00:00+00:00"),
            tx_at(75, "2024-03-01T00:00:00+00:00"),
        ];
        let buckets = monthly_xp(&txs);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, "Jan");
        assert_eq!(buckets[0].xp, 150);
        assert_eq!(buckets[1].month, "Mar");
    }

    #[test]
    fn test_monthly_xp_skips_unparsable_dates() {
        let txs = vec![tx_at(100, "not-a-date"), tx_at(10, "2024-06-01T00:00:00+00:00")];
        let buckets = monthly_xp(&txs);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, "Jun");
    }

    #[test]
    fn test_cumulative_xp_running_sum() {
        let txs = vec![tx(100, "/a"), tx(250, "/b")];
        assert_eq!(cumulative_xp(&txs), vec![100, 350]);
    }

    #[test]
    fn test_cumulative_xp_empty() {
        assert!(cumulative_xp(&[]).is_empty());
    }
}

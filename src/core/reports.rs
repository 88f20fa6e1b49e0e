//! Read-only reports derived from the current registry state.
//!
//! Each generator returns a plain data structure that can be serialized to
//! JSON or rendered as text through `Display`.

use crate::core::registry::FairRegistry;
use crate::domain::model::Key;
use crate::domain::ports::Clock;
use crate::utils::error::Result;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupiedStand {
    pub stand: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompaniesAndStandsReport {
    /// Occupied stands in registration order.
    pub occupied: Vec<OccupiedStand>,
    pub companies_without_stand: Vec<String>,
    pub available_stands: Vec<String>,
}

pub fn companies_and_stands<C: Clock>(registry: &FairRegistry<C>) -> CompaniesAndStandsReport {
    let mut with_stand: HashSet<&Key> = HashSet::new();
    let mut occupied = Vec::new();
    for stand in registry.iter_stands() {
        if let Some(company) = stand.assigned_company() {
            with_stand.insert(company);
            occupied.push(OccupiedStand {
                stand: stand.number().to_string(),
                company: company.to_string(),
            });
        }
    }

    let mut without: Vec<&Key> = registry
        .iter_companies()
        .map(|c| c.key())
        .filter(|k| !with_stand.contains(k))
        .collect();
    without.sort();

    let mut available: Vec<&Key> = registry
        .iter_stands()
        .filter(|s| s.is_available())
        .map(|s| s.key())
        .collect();
    available.sort();

    CompaniesAndStandsReport {
        occupied,
        companies_without_stand: without.iter().map(|k| k.to_string()).collect(),
        available_stands: available.iter().map(|k| k.to_string()).collect(),
    }
}

impl fmt::Display for CompaniesAndStandsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== REPORT: Companies and Stands ===")?;

        writeln!(f, "\nCompanies with a stand:")?;
        if self.occupied.is_empty() {
            writeln!(f, " (none)")?;
        }
        for row in &self.occupied {
            writeln!(f, " - {} -> Stand {}", row.company, row.stand)?;
        }

        writeln!(f, "\nCompanies WITHOUT a stand:")?;
        if self.companies_without_stand.is_empty() {
            writeln!(f, " (none)")?;
        }
        for name in &self.companies_without_stand {
            writeln!(f, " - {}", name)?;
        }

        writeln!(f, "\nUnassigned stands:")?;
        if self.available_stands.is_empty() {
            writeln!(f, " (none)")?;
        }
        for number in &self.available_stands {
            writeln!(f, " - Stand {}", number)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorVisits {
    pub id: String,
    /// `None` when the id no longer belongs to a registered visitor.
    pub name: Option<String>,
    pub stands: Vec<String>,
    pub comment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VisitsReport {
    NoData,
    Visits {
        registered: Vec<VisitorVisits>,
        unregistered: Vec<VisitorVisits>,
    },
}

#[derive(Default)]
struct Tally<'a> {
    stands: BTreeSet<&'a Key>,
    comments: usize,
}

impl Tally<'_> {
    fn stand_numbers(&self) -> Vec<String> {
        self.stands.iter().map(|k| k.to_string()).collect()
    }
}

/// Stands visited per author, derived from comments.
///
/// Author ids that match no registered visitor are listed separately. An id
/// reused by a new visitor inherits the older comments; there is no way to
/// tell them apart.
pub fn visitors_and_visits<C: Clock>(registry: &FairRegistry<C>) -> VisitsReport {
    let mut tallies: HashMap<&Key, Tally> = HashMap::new();
    for stand in registry.iter_stands() {
        for comment in stand.comments() {
            let tally = tallies.entry(comment.author()).or_default();
            tally.stands.insert(stand.key());
            tally.comments += 1;
        }
    }

    if tallies.is_empty() {
        return VisitsReport::NoData;
    }

    let mut visitors: Vec<_> = registry.iter_visitors().collect();
    visitors.sort_by(|a, b| a.key().cmp(b.key()));
    let registered = visitors
        .iter()
        .map(|v| {
            let tally = tallies.get(v.key());
            VisitorVisits {
                id: v.id().to_string(),
                name: Some(v.name().to_string()),
                stands: tally.map(Tally::stand_numbers).unwrap_or_default(),
                comment_count: tally.map_or(0, |t| t.comments),
            }
        })
        .collect();

    let known: HashSet<&Key> = registry.iter_visitors().map(|v| v.key()).collect();
    let mut orphans: Vec<(&Key, &Tally)> = tallies
        .iter()
        .filter(|(id, _)| !known.contains(*id))
        .map(|(id, tally)| (*id, tally))
        .collect();
    orphans.sort_by(|a, b| a.0.cmp(b.0));
    let unregistered = orphans
        .into_iter()
        .map(|(id, tally)| VisitorVisits {
            id: id.to_string(),
            name: None,
            stands: tally.stand_numbers(),
            comment_count: tally.comments,
        })
        .collect();

    VisitsReport::Visits {
        registered,
        unregistered,
    }
}

impl fmt::Display for VisitorVisits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, " - {} ({})", self.id, name)?,
            None => write!(f, " - {} (not currently registered)", self.id)?,
        }
        let stands = if self.stands.is_empty() {
            "-".to_string()
        } else {
            format!("[{}]", self.stands.join(", "))
        };
        write!(f, " -> Stands: {} | Comments: {}", stands, self.comment_count)
    }
}

impl fmt::Display for VisitsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== REPORT: Visitors and visited Stands ===")?;
        match self {
            VisitsReport::NoData => writeln!(f, "(no visit or comment data)"),
            VisitsReport::Visits {
                registered,
                unregistered,
            } => {
                for row in registered.iter().chain(unregistered) {
                    writeln!(f, "{}", row)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandRating {
    pub stand: String,
    pub average: Option<f64>,
    pub comment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingsReport {
    pub rows: Vec<StandRating>,
}

/// Best-rated stands first; unrated stands go last in registration order.
pub fn ratings_by_stand<C: Clock>(registry: &FairRegistry<C>) -> RatingsReport {
    let mut rows: Vec<StandRating> = registry
        .iter_stands()
        .map(|s| StandRating {
            stand: s.number().to_string(),
            average: s.average_rating(),
            comment_count: s.comment_count(),
        })
        .collect();

    rows.sort_by(|a, b| match (a.average, b.average) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    RatingsReport { rows }
}

impl fmt::Display for RatingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== REPORT: Average rating per Stand ===")?;
        for row in &self.rows {
            match row.average {
                Some(avg) => writeln!(
                    f,
                    " - Stand {}: ★{:.2} ({} comments)",
                    row.stand, avg, row.comment_count
                )?,
                None => writeln!(f, " - Stand {}: no ratings", row.stand)?,
            }
        }
        Ok(())
    }
}

/// Pretty-printed JSON for any report.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Company, StandSize, Visitor};
    use crate::domain::ports::FixedClock;
    use chrono::NaiveDate;

    fn registry() -> FairRegistry<FixedClock> {
        FairRegistry::with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
    }

    #[test]
    fn test_companies_and_stands_sorting() {
        let mut reg = registry();
        for name in ["zeta", "Acme", "beta"] {
            reg.register_company(Company::new(name, "Tech", "x@y.z").unwrap())
                .unwrap();
        }
        for number in ["B2", "a1", "C3"] {
            reg.create_stand(number, "Hall", StandSize::Medium).unwrap();
        }
        reg.assign_stand("C3", "beta").unwrap();

        let report = companies_and_stands(&reg);
        assert_eq!(
            report.occupied,
            vec![OccupiedStand {
                stand: "C3".into(),
                company: "beta".into()
            }]
        );
        assert_eq!(report.companies_without_stand, vec!["Acme", "zeta"]);
        assert_eq!(report.available_stands, vec!["a1", "B2"]);

        let text = report.to_string();
        assert!(text.contains(" - beta -> Stand C3\n"));
        assert!(text.contains(" - Stand a1\n"));
    }

    #[test]
    fn test_companies_and_stands_empty_sections() {
        let report = companies_and_stands(&registry());
        assert_eq!(report.to_string().matches("(none)").count(), 3);
    }

    #[test]
    fn test_visits_report_without_comments() {
        let mut reg = registry();
        reg.register_visitor(Visitor::new("V1", "Ana", "ana@x.com").unwrap())
            .unwrap();
        let report = visitors_and_visits(&reg);
        assert_eq!(report, VisitsReport::NoData);
        assert!(report.to_string().contains("(no visit or comment data)"));
    }

    #[test]
    fn test_visits_report_aggregates_per_visitor() {
        let mut reg = registry();
        reg.register_visitor(Visitor::new("v2", "Luis", "l@x.com").unwrap())
            .unwrap();
        reg.register_visitor(Visitor::new("V1", "Ana", "a@x.com").unwrap())
            .unwrap();
        reg.create_stand("B1", "Hall", StandSize::Small).unwrap();
        reg.create_stand("A1", "Hall", StandSize::Small).unwrap();
        reg.add_comment("V1", "B1", 4, "good").unwrap();
        reg.add_comment("V1", "A1", 5, "great").unwrap();
        reg.add_comment("v1", "a1", 3, "again").unwrap();

        let VisitsReport::Visits {
            registered,
            unregistered,
        } = visitors_and_visits(&reg)
        else {
            panic!("expected visits");
        };
        assert!(unregistered.is_empty());
        assert_eq!(registered.len(), 2);
        assert_eq!(registered[0].id, "V1");
        assert_eq!(registered[0].stands, vec!["A1", "B1"]);
        assert_eq!(registered[0].comment_count, 3);
        assert_eq!(registered[1].id, "v2");
        assert!(registered[1].stands.is_empty());
        assert_eq!(
            registered[1].to_string(),
            " - v2 (Luis) -> Stands: - | Comments: 0"
        );
    }

    #[test]
    fn test_unregistered_row_format() {
        let row = VisitorVisits {
            id: "X9".into(),
            name: None,
            stands: vec!["A1".into()],
            comment_count: 2,
        };
        assert_eq!(
            row.to_string(),
            " - X9 (not currently registered) -> Stands: [A1] | Comments: 2"
        );
    }

    #[test]
    fn test_ratings_report_order() {
        let mut reg = registry();
        reg.register_visitor(Visitor::new("V1", "Ana", "a@x.com").unwrap())
            .unwrap();
        for number in ["none", "low", "high"] {
            reg.create_stand(number, "Hall", StandSize::Large).unwrap();
        }
        reg.add_comment("V1", "low", 2, "meh").unwrap();
        reg.add_comment("V1", "high", 4, "good").unwrap();
        reg.add_comment("V1", "high", 5, "great").unwrap();

        let report = ratings_by_stand(&reg);
        let order: Vec<_> = report.rows.iter().map(|r| r.stand.as_str()).collect();
        assert_eq!(order, vec!["high", "low", "none"]);

        let text = report.to_string();
        assert!(text.contains(" - Stand high: ★4.50 (2 comments)\n"));
        assert!(text.contains(" - Stand low: ★2.00 (1 comments)\n"));
        assert!(text.contains(" - Stand none: no ratings\n"));
    }
}

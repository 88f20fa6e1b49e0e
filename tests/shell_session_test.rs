use anyhow::Result;
use chrono::NaiveDate;
use fair_registry::{FairConfig, FairRegistry, FixedClock, Shell};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
[fair]
name = "Test Fair"

[[seed.companies]]
name = "Acme"
sector = "Tech"
email = "hi@acme.test"

[[seed.companies]]
name = "Beta"
sector = "Food"
email = "hi@beta.test"

[[seed.stands]]
number = "A1"
location = "Hall A"
size = "SMALL"

[[seed.stands]]
number = "B1"
location = "Hall B"
size = "MEDIUM"

[[seed.visitors]]
id = "V1"
name = "Ana"
email = "ana@x.com"

[[seed.assignments]]
stand = "A1"
company = "Acme"
"#;

fn seeded_registry() -> Result<FairRegistry<FixedClock>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(CONFIG.as_bytes())?;
    let config = FairConfig::from_file(file.path())?;

    let mut registry =
        FairRegistry::with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
    config.seed_registry(&mut registry)?;
    Ok(registry)
}

fn run_session(script: &str) -> Result<String> {
    let mut shell = Shell::new(seeded_registry()?, Cursor::new(script.to_string()), Vec::new());
    shell.run()?;
    let (_, output) = shell.into_parts();
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_companies_report_after_session() -> Result<()> {
    let out = run_session("7\nB1\nBeta\n15\n0\n")?;
    assert!(out.contains("Stand assigned."));
    assert!(out.contains(" - Acme -> Stand A1\n"));
    assert!(out.contains(" - Beta -> Stand B1\n"));
    assert!(out.contains("Companies WITHOUT a stand:\n (none)\n"));
    Ok(())
}

#[test]
fn test_conflict_is_printed_and_loop_continues() -> Result<()> {
    let out = run_session("7\nA1\nBeta\n8\nA1\n7\nA1\nBeta\n0\n")?;
    assert!(out.contains("Error: Stand A1 is already assigned to Acme"));
    assert!(out.contains("Stand unassigned."));
    assert!(out.contains("Stand assigned."));
    assert!(out.ends_with("Exiting...\n"));
    Ok(())
}

#[test]
fn test_delete_company_then_list_stands() -> Result<()> {
    let out = run_session("4\nacme\n6\n0\n")?;
    assert!(out.contains("Company deleted (its stands were freed)."));
    assert!(out.contains("Occupied:\n(none)\n"));
    Ok(())
}

#[test]
fn test_visit_report_and_visitor_deletion() -> Result<()> {
    let script = "13\nV1\nB1\n4\nnice stand\n16\n12\nv1\n16\n17\n0\n";
    let out = run_session(script)?;
    assert!(out.contains(" - V1 (Ana) -> Stands: [B1] | Comments: 1"));
    assert!(out.contains("Visitor deleted (and their comments removed)."));
    assert!(out.contains("(no visit or comment data)"));
    assert!(out.contains(" - Stand A1: no ratings"));
    Ok(())
}

#[test]
fn test_session_ends_cleanly_at_end_of_input() -> Result<()> {
    let out = run_session("1\nGamma\n")?;
    assert!(out.contains("Sector: "));
    assert!(!out.contains("Company registered."));
    Ok(())
}

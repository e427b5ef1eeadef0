use super::types::{Report, TestOutcome};
use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML from a report: one testcase per outcome
pub fn generate_junit_xml(report: &Report) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let tests = report.total_count.to_string();
    let failures = report.failed_count.to_string();

    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "petstore-tester-run"));
    suites_start.push_attribute(("tests", tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "user-api"));
    suite_start.push_attribute(("tests", tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("skipped", "0"));
    suite_start.push_attribute(("id", report.session_id.as_str()));
    suite_start.push_attribute(("timestamp", report.generated_at.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for outcome in &report.outcomes {
        write_test_case(&mut writer, outcome)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, outcome: &TestOutcome) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", outcome.test_name.as_str()));
    case_start.push_attribute(("classname", "petstore.user"));
    case_start.push_attribute(("timestamp", outcome.timestamp.as_str()));

    if outcome.passed() {
        writer.write_event(Event::Empty(case_start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(case_start))?;

    let observed = outcome
        .observed_status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "no response".to_string());
    let message = format!(
        "expected {}, observed {}",
        outcome.expected_status_code, observed
    );

    let mut fail_start = BytesStart::new("failure");
    fail_start.push_attribute(("message", message.as_str()));
    fail_start.push_attribute(("type", "AssertionError"));
    writer.write_event(Event::Start(fail_start))?;
    if !outcome.notes.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&outcome.notes)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("failure")))?;

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Write the JUnit report, replacing any previous file at `path`
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let xml = generate_junit_xml(report)?;
    std::fs::write(path, xml)
        .with_context(|| format!("Failed to write JUnit report: {}", path.display()))?;
    log::info!("JUnit report saved to: {}", path.display());
    Ok(())
}

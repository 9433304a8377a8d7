use anyhow::Result;
use chrono::{TimeZone, Utc};
use profile_etl::config::Config;
use profile_etl::runner::run_with_context;
use profile_etl::{run, BatchContext, EtlError, Row, RowTags, RunOptions};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const INPUT: &str = r#"{"uid":"1","name":"A","gender":"F","email":"a@x.com","birthdate":"2000-01-01","salary":1,"credit_score":700,"active":true}
{"uid":"2","name":"B"}
{"uid":"3","name":"C","gender":"M","email":"c@x.com","birthdate":null,"salary":1,"credit_score":1,"active":true}
not-json
{"uid":"5","name":"E","gender":"F","email":"e@x.com","birthdate":"1990-05-05","salary":2.5,"credit_score":650,"active":false,"extra":{"k":[1,2]}}
"#;

const REQUIRED: &[&str] = &[
    "uid",
    "name",
    "gender",
    "email",
    "birthdate",
    "salary",
    "credit_score",
    "active",
    "modified_timestamp",
];

fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .map(|l| -> Result<Row> { Ok(serde_json::from_str(l)?) })
        .collect()
}

fn options(input: &Path) -> RunOptions {
    RunOptions {
        input: input.to_path_buf(),
        print_lines: false,
    }
}

#[test]
fn test_run_splits_input_into_ok_and_reject_files() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("profiles.json");
    fs::write(&input, INPUT)?;

    let context = BatchContext::with_id(
        "batch-42",
        Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap(),
        RowTags::default(),
    );
    let summary = run_with_context(&options(&input), &Config::default(), &context)?;

    assert_eq!(summary.counters.lines_read, 5);
    assert_eq!(summary.counters.accepted, 2);
    assert_eq!(summary.counters.rejected, 3);
    assert_eq!(summary.batch_id, "batch-42");

    let ok_path = temp_dir.path().join("profiles_20240131_ok.json");
    let reject_path = temp_dir.path().join("profiles_20240131_reject.json");
    assert_eq!(summary.accepted_file, ok_path.display().to_string());

    let ok_rows = read_rows(&ok_path)?;
    assert_eq!(ok_rows.len(), 2);
    for row in &ok_rows {
        for field in REQUIRED {
            assert!(!row[*field].is_null(), "accepted row has null {field}");
        }
        assert_eq!(row["batch_id"], "batch-42");
        assert_eq!(row["tags"]["allow_user_groups"][0], "admin");
    }
    assert_eq!(ok_rows[1]["extra"]["k"][1], 2);

    let rejected = read_rows(&reject_path)?;
    assert_eq!(rejected.len(), 3);
    for row in &rejected {
        assert!(!row["error"].as_str().unwrap_or_default().is_empty());
    }
    assert_eq!(rejected[0]["uid"], "2");
    assert_eq!(rejected[1]["error"], "[0002][ERR]: birthdate can NOT be None or null.");
    assert_eq!(rejected[2]["line_number"], 3);
    Ok(())
}

#[test]
fn test_accepted_timestamp_uses_day_month_layout() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("one.json");
    fs::write(&input, INPUT.lines().next().unwrap())?;

    let summary = run(&options(&input), &Config::default())?;
    let rows = read_rows(Path::new(&summary.accepted_file))?;

    let stamp = rows[0]["modified_timestamp"].as_str().unwrap().to_string();
    let parsed = chrono::DateTime::parse_from_str(&stamp, "%Y-%d-%m %H:%M:%S%.6f %z")?;
    assert_eq!(parsed.offset().local_minus_utc(), 0);
    assert!(stamp.ends_with(" +0000"));
    Ok(())
}

#[test]
fn test_reruns_classify_identically() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("profiles.json");
    fs::write(&input, INPUT)?;

    let first = run(&options(&input), &Config::default())?;
    let second = run(&options(&input), &Config::default())?;

    assert_eq!(first.counters, second.counters);
    assert_ne!(first.batch_id, second.batch_id);
    Ok(())
}

#[test]
fn test_output_dir_from_config() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("profiles.json");
    fs::write(&input, INPUT)?;
    let out_dir = temp_dir.path().join("out").join("nested");

    let config = Config::from_toml(&format!(
        "[output]\ndir = {:?}\n[tags]\nsecurity_level = \"low\"\n",
        out_dir.display().to_string()
    ))?;
    let summary = run(&options(&input), &config)?;

    assert!(Path::new(&summary.accepted_file).starts_with(&out_dir));
    let rows = read_rows(Path::new(&summary.accepted_file))?;
    assert_eq!(rows[0]["tags"]["security_level"], "low");
    assert_eq!(rows[0]["tags"]["allow_user_groups"][0], "admin");
    Ok(())
}

#[test]
fn test_missing_input_aborts_before_creating_outputs() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("absent.json");

    let err = run(&options(&input), &Config::default()).unwrap_err();

    assert!(matches!(err, EtlError::OpenInput { .. }));
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_empty_input_creates_empty_outputs() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("empty.json");
    fs::write(&input, "")?;

    let summary = run(&options(&input), &Config::default())?;

    assert_eq!(summary.counters.lines_read, 0);
    assert_eq!(fs::read_to_string(&summary.accepted_file)?, "");
    assert_eq!(fs::read_to_string(&summary.rejected_file)?, "");
    Ok(())
}

#[test]
fn test_print_lines_does_not_change_outputs() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("profiles.json");
    fs::write(&input, INPUT)?;

    let quiet = run(&options(&input), &Config::default())?;
    let echoed = run(
        &RunOptions {
            input: input.clone(),
            print_lines: true,
        },
        &Config::default(),
    )?;

    assert_eq!(quiet.counters, echoed.counters);
    assert_eq!(read_rows(Path::new(&echoed.accepted_file))?.len(), 2);
    Ok(())
}

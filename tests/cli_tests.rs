use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains as str_contains;
use tempfile::TempDir;

#[allow(deprecated)]
fn phison() -> Command {
    let mut cmd = Command::cargo_bin("phison").expect("phison binary");
    cmd.env_remove("PHISON_CONFIG")
        .env("PHISON_PASSPHRASE", "phison2025")
        .args(["--today", "10/06/2025"]);
    cmd
}

fn run_shell(script: &str) -> assert_cmd::assert::Assert {
    phison().write_stdin(script.to_string()).assert()
}

#[test]
fn wrong_passphrase_is_refused() {
    phison()
        .env("PHISON_PASSPHRASE", "phison2024")
        .write_stdin("student list\n")
        .assert()
        .failure()
        .stderr(str_contains("Wrong passphrase"))
        .stdout(str_contains("No students registered").not());
}

#[test]
fn shell_starts_with_menu() {
    run_shell("exit\n")
        .success()
        .stdout(str_contains("Phison - 10/06/2025"))
        .stdout(str_contains("> 1. Register Students"));
}

#[test]
fn errors_do_not_end_the_shell() {
    run_shell("student add Ana --birth 31/02/1995 --due 01/07/2025\nteacher add Marcos\nteacher add marcos\nteacher list\n")
        .success()
        .stdout(str_contains("Error: Validation error"))
        .stdout(str_contains("Warning: Teacher already exists: marcos"))
        .stdout(str_contains("- Marcos"));
}

#[test]
fn tuition_alerts_and_birthdays() {
    run_shell(
        "student add Ana --birth 07/06/1995 --due 12/06/2025\n\
         student add Bruno --birth 01/01/1990 --due 01/06/2025\n\
         student add Carla --birth 15/03/1988 --due 30/06/2025\n\
         alerts\nbirthdays\n",
    )
    .success()
    .stdout(str_contains("DUE IN 2 DAYS"))
    .stdout(str_contains("OVERDUE"))
    .stdout(str_contains("Carla").count(1));
}

#[test]
fn cash_summary_for_the_month() {
    run_shell(
        "cash add 02/06/2025 --in 500 --out 120,50\n\
         cash add 15/05/2025 --in 999\n\
         cash summary\n",
    )
    .success()
    .stdout(str_contains("Cash Summary - 06/2025"))
    .stdout(str_contains("R$379.50"));
}

#[test]
fn teaching_load_pay() {
    run_shell(
        "teacher add Julia\n\
         teacher classes Julia 02/06/2025 3\n\
         teacher classes Julia 03/06/2025 2\n\
         teacher summary julia\n",
    )
    .success()
    .stdout(str_contains("Total classes: 5"))
    .stdout(str_contains("R$110.00"));
}

#[test]
fn export_writes_spreadsheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("alunos.xlsx");
    let script = format!(
        "student add \"Ana Souza\" --birth 20/01/1995 --due 01/07/2025\nexport students \"{}\"\n",
        path.display()
    );

    run_shell(&script)
        .success()
        .stdout(str_contains("Exported 1 row(s)"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn init_config_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("phison.yaml");

    phison()
        .arg("init-config")
        .arg(&path)
        .assert()
        .success()
        .stdout(str_contains("Default settings written"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("passphrase: phison2025"));
    assert!(text.contains("- Rent"));
}

#[test]
fn configured_passphrase_and_rate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("phison.json");
    std::fs::write(&path, r#"{"passphrase": "escola", "class_rate": 3000}"#).unwrap();

    phison()
        .arg("--config")
        .arg(&path)
        .env("PHISON_PASSPHRASE", "escola")
        .write_stdin("teacher add Julia\nteacher classes Julia 02/06/2025 2\nteacher summary Julia\n")
        .assert()
        .success()
        .stdout(str_contains("R$60.00"));
}

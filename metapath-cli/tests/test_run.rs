use std::io::Write;
use std::process::{Command, Stdio};

use clap::Parser;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use test_case::test_case;

use metapath_cli::args::Cli;
use metapath_cli::source::{DescribeInstancesFile, FetchError, MetadataSource};
use metapath_cli::{exit_codes, run, run_with_source};

fn describe_instances() -> Value {
    json!({
        "Reservations": [
            {
                "ReservationId": "r-0123456789abcdef0",
                "OwnerId": "123456789012",
                "Instances": [
                    {
                        "InstanceId": "i-0abcd1234efgh5678",
                        "InstanceType": "t3.micro",
                        "Placement": {"AvailabilityZone": "us-east-1a", "Tenancy": "default"},
                        "State": {"Code": 16, "Name": "running"},
                        "KernelId": null
                    },
                    {
                        "InstanceId": "i-0ffff0000eeee1111",
                        "InstanceType": "m5.large"
                    }
                ]
            }
        ]
    })
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run_cli(args: &[&str]) -> (anyhow::Result<u8>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = run(&cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_file_source_selects_first_instance() {
    let file = write_temp(&describe_instances().to_string());
    let document = DescribeInstancesFile::new(file.path()).fetch().unwrap();
    assert_eq!(document["InstanceId"], json!("i-0abcd1234efgh5678"));
}

#[test]
fn test_default_report() {
    let file = write_temp(&describe_instances().to_string());
    let path = file.path().to_str().unwrap();

    let (result, stdout) = run_cli(&["metapath", "--input", path]);
    assert_eq!(result.unwrap(), exit_codes::SUCCESS);
    assert!(stdout.starts_with("All metadata:\n{\n  \"InstanceId\": \"i-0abcd1234efgh5678\",\n"));
    assert!(stdout.ends_with("\n\nMetadata for key 'InstanceType':\n\"t3.micro\"\n"));
    assert!(!stdout.contains("m5.large"));
}

#[test_case("InstanceType", "\"t3.micro\"\n", exit_codes::SUCCESS ; "top level key")]
#[test_case("Placement/AvailabilityZone", "\"us-east-1a\"\n", exit_codes::SUCCESS ; "nested key")]
#[test_case("KernelId", "null\n", exit_codes::SUCCESS ; "present null")]
#[test_case("Placement/Region", "null\n", exit_codes::SUCCESS ; "absent key is not an error")]
#[test_case("State/Name/Length", "null\n", exit_codes::SUCCESS ; "scalar intermediate")]
fn test_key_only(key: &str, expected: &str, code: u8) {
    let file = write_temp(&describe_instances().to_string());
    let path = file.path().to_str().unwrap();

    let (result, stdout) = run_cli(&["metapath", "--input", path, "--key-only", "--key", key]);
    assert_eq!(result.unwrap(), code);
    assert_eq!(stdout, expected);
}

#[test]
fn test_strict_absent_key() {
    let file = write_temp(&describe_instances().to_string());
    let path = file.path().to_str().unwrap();

    let (result, stdout) = run_cli(&["metapath", "--input", path, "--strict", "-k", "Placement/Region"]);
    assert_eq!(result.unwrap(), exit_codes::KEY_NOT_FOUND);
    assert!(stdout.ends_with("Metadata for key 'Placement/Region':\nnull\n"));

    let (result, _) = run_cli(&["metapath", "--input", path, "--strict", "-k", "KernelId"]);
    assert_eq!(result.unwrap(), exit_codes::SUCCESS);
}

#[test]
fn test_no_instances() {
    let file = write_temp(r#"{"Reservations": []}"#);
    let path = file.path().to_str().unwrap();

    let (result, stdout) = run_cli(&["metapath", "--input", path]);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::NoInstances)
    ));
    assert!(format!("{err:#}").contains("failed to fetch metadata from file"));
    assert!(stdout.is_empty());
}

#[test]
fn test_invalid_json() {
    let file = write_temp("not json");
    let path = file.path().to_str().unwrap();

    let (result, _) = run_cli(&["metapath", "--input", path]);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::Decode(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let (result, _) = run_cli(&["metapath", "--input", missing.to_str().unwrap()]);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::Io { .. })
    ));
}

struct FixedSource(Value);

impl MetadataSource for FixedSource {
    fn fetch(&self) -> Result<Value, FetchError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[test]
fn test_run_with_custom_source() {
    let source = FixedSource(json!({"instanceType": "c6g.medium", "region": "eu-west-1"}));
    let cli = Cli::try_parse_from(["metapath", "--compact", "-k", "instanceType"]).unwrap();

    let mut out = Vec::new();
    let code = run_with_source(&source, &cli, &mut out).unwrap();
    assert_eq!(code, exit_codes::SUCCESS);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "All metadata:\n{\"instanceType\":\"c6g.medium\",\"region\":\"eu-west-1\"}\n\nMetadata for key 'instanceType':\n\"c6g.medium\"\n"
    );
}

#[test]
fn test_reads_describe_instances_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_metapath"))
        .args(["--key-only", "-k", "Placement/AvailabilityZone"])
        .env_remove("METAPATH_INPUT")
        .env_remove("METAPATH_KEY")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(describe_instances().to_string().as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(i32::from(exit_codes::SUCCESS)));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "\"us-east-1a\"\n");
}

#[test]
fn test_empty_stdin_is_a_fetch_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_metapath"))
        .env_remove("METAPATH_INPUT")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(i32::from(exit_codes::FETCH_ERROR)));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to fetch metadata from stdin"));
}

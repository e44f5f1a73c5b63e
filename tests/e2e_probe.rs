mod support;

use std::fs;

use tempfile::tempdir;

use support::{closed_port_url, run_reqprobe, spawn_http_server};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn ensure_success(output: &std::process::Output) -> Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    Err(format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    ))
}

#[test]
fn e2e_five_requests_two_workers() -> Result<(), String> {
    let (url, server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let log_path = dir.path().join("results.ndjson");
    let report_path = dir.path().join("report.md");
    let log_arg = log_path.to_string_lossy().into_owned();
    let report_arg = report_path.to_string_lossy().into_owned();

    let output = run_reqprobe(
        [
            "-u",
            url.as_str(),
            "-n",
            "5",
            "-C",
            "2",
            "-o",
            log_arg.as_str(),
            "-r",
            report_arg.as_str(),
        ],
        dir.path(),
    )?;
    ensure_success(&output)?;

    let stdout = stdout_of(&output);
    let status_lines = stdout
        .lines()
        .filter(|line| line.starts_with("Status: 200 Elapsed: "))
        .count();
    if status_lines != 5 {
        return Err(format!("Expected 5 status lines, got {}:\n{}", status_lines, stdout));
    }
    for expected in ["Total Requests: 5", "Successful: 5", "Errors: 0", "Avg Latency:"] {
        if !stdout.contains(expected) {
            return Err(format!("Missing '{}' in:\n{}", expected, stdout));
        }
    }

    let log = fs::read_to_string(&log_path).map_err(|err| format!("read log failed: {}", err))?;
    let records: Vec<serde_json::Value> = log
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()
        .map_err(|err| format!("invalid log line: {}", err))?;
    if records.len() != 5 {
        return Err(format!("Expected 5 log records, got {}", records.len()));
    }
    let all_ok = records.iter().all(|record| {
        record.get("status_code").and_then(serde_json::Value::as_u64) == Some(200)
            && record.get("content_length").and_then(serde_json::Value::as_u64) == Some(2)
            && record.get("error_message").is_none()
            && record.get("response_body").is_none()
    });
    if !all_ok {
        return Err(format!("Unexpected log records:\n{}", log));
    }

    let report =
        fs::read_to_string(&report_path).map_err(|err| format!("read report failed: {}", err))?;
    let rows = report
        .lines()
        .filter(|line| line.starts_with("| ") && line.ends_with("| OK |"))
        .count();
    if rows != 5 {
        return Err(format!("Expected 5 report rows, got {}:\n{}", rows, report));
    }

    if server.request_lines().len() != 5 {
        return Err(format!("Server saw {:?}", server.request_lines()));
    }
    Ok(())
}

#[test]
fn e2e_unreachable_host_reports_no_successes() -> Result<(), String> {
    let url = closed_port_url()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_reqprobe(["-u", url.as_str(), "-n", "3", "-C", "2"], dir.path())?;
    ensure_success(&output)?;

    let stdout = stdout_of(&output);
    if !stdout.contains("Errors: 3") || !stdout.contains("No successful requests.") {
        return Err(format!("Unexpected output:\n{}", stdout));
    }
    let error_lines = stdout
        .lines()
        .filter(|line| line.starts_with("Status: 0 Elapsed: ") && line.contains(" Error: "))
        .count();
    if error_lines != 3 {
        return Err(format!("Expected 3 error lines:\n{}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_config_file_with_script_templates_request() -> Result<(), String> {
    let (url, server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = format!(
        r#"
url = "{url}/items/{{{{id}}}}"
method = "get"
requests = 2
concurrency = 1
pre_request_script = """
let id = 40 + 2;
env.set('id', id);
env.set('sig', sha256('reqprobe'));
"""

[query_params]
sig = "{{{{sig}}}}"
"#
    );
    fs::write(dir.path().join("reqprobe.toml"), config)
        .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_reqprobe(["-n", "3"], dir.path())?;
    ensure_success(&output)?;

    let lines = server.request_lines();
    if lines.len() != 3 {
        return Err(format!("CLI request count should win, server saw {:?}", lines));
    }
    let expected_prefix = "GET /items/42?sig=";
    if !lines.iter().all(|line| line.starts_with(expected_prefix)) {
        return Err(format!("Unexpected request lines: {:?}", lines));
    }
    Ok(())
}

#[test]
fn e2e_missing_url_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_reqprobe(["-n", "2"], dir.path())?;
    if output.status.success() {
        return Err("Expected a non-zero exit without a URL".to_owned());
    }
    Ok(())
}

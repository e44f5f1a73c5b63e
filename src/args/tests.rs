use super::parsers::{parse_header, parse_query};
use super::*;
use clap::Parser;
use std::time::Duration;

fn parse(argv: &[&str]) -> Result<ProbeArgs, String> {
    ProbeArgs::try_parse_from(argv).map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn defaults_apply_without_flags() -> Result<(), String> {
    let args = parse(&["reqprobe", "-u", "http://localhost"])?;
    if args.method != HttpMethod::Get {
        return Err(format!("Unexpected method: {:?}", args.method));
    }
    if args.requests.get() != 1 || args.concurrency.get() != 1 {
        return Err("Expected requests and concurrency to default to 1".to_owned());
    }
    if args.delay != Duration::ZERO {
        return Err(format!("Unexpected delay: {:?}", args.delay));
    }
    if args.body_type != BodyKind::Raw {
        return Err(format!("Unexpected body type: {:?}", args.body_type));
    }
    Ok(())
}

#[test]
fn parses_run_shape_and_templates() -> Result<(), String> {
    let args = parse(&[
        "reqprobe",
        "-u",
        "http://localhost/{{path}}",
        "-X",
        "POST",
        "-n",
        "20",
        "-C",
        "4",
        "-d",
        "250ms",
        "-H",
        "Authorization: Bearer {{token}}",
        "-q",
        "page=2",
        "--body-type",
        "json",
        "--body",
        "{\"k\":1}",
    ])?;
    if args.method != HttpMethod::Post {
        return Err(format!("Unexpected method: {:?}", args.method));
    }
    if args.requests.get() != 20 || args.concurrency.get() != 4 {
        return Err("Unexpected requests/concurrency".to_owned());
    }
    if args.delay != Duration::from_millis(250) {
        return Err(format!("Unexpected delay: {:?}", args.delay));
    }
    if args.headers != vec![("Authorization".to_owned(), "Bearer {{token}}".to_owned())] {
        return Err(format!("Unexpected headers: {:?}", args.headers));
    }
    if args.query_params != vec![("page".to_owned(), "2".to_owned())] {
        return Err(format!("Unexpected query: {:?}", args.query_params));
    }
    if args.body_type != BodyKind::Json {
        return Err(format!("Unexpected body type: {:?}", args.body_type));
    }
    Ok(())
}

#[test]
fn zero_requests_rejected() -> Result<(), String> {
    if ProbeArgs::try_parse_from(["reqprobe", "-n", "0"]).is_ok() {
        return Err("Expected zero requests to be rejected".to_owned());
    }
    if ProbeArgs::try_parse_from(["reqprobe", "-C", "0"]).is_ok() {
        return Err("Expected zero concurrency to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn parse_header_valid() -> Result<(), String> {
    let (key, value) = parse_header("Content-Type: application/json")
        .map_err(|err| format!("Expected Ok, got Err: {}", err))?;
    if key != "Content-Type" || value != "application/json" {
        return Err(format!("Unexpected header: {}={}", key, value));
    }
    if parse_header("MissingDelimiter").is_ok() {
        return Err("Expected Err for invalid header".to_owned());
    }
    Ok(())
}

#[test]
fn parse_query_keeps_value_verbatim() -> Result<(), String> {
    let (key, value) =
        parse_query("sig={{sig}}=x").map_err(|err| format!("Expected Ok, got Err: {}", err))?;
    if key != "sig" || value != "{{sig}}=x" {
        return Err(format!("Unexpected query: {}={}", key, value));
    }
    if parse_query("=value").is_ok() {
        return Err("Expected Err for empty key".to_owned());
    }
    if parse_query("novalue").is_ok() {
        return Err("Expected Err for missing '='".to_owned());
    }
    Ok(())
}

#[test]
fn parse_delay_units() -> Result<(), String> {
    let cases = [
        ("0", Duration::ZERO),
        ("3", Duration::from_secs(3)),
        ("3s", Duration::from_secs(3)),
        ("150ms", Duration::from_millis(150)),
        ("2m", Duration::from_secs(120)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_delay(raw).map_err(|err| format!("{}: {}", raw, err))?;
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", raw, parsed));
        }
    }
    for bad in ["", "-1", "abc", "5h"] {
        if parse_delay(bad).is_ok() {
            return Err(format!("Expected '{}' to be rejected", bad));
        }
    }
    Ok(())
}

#[test]
fn body_kind_keeps_unknown_names() -> Result<(), String> {
    let cases = [
        ("JSON", BodyKind::Json),
        ("form", BodyKind::Form),
        ("xml", BodyKind::Xml),
        ("", BodyKind::Raw),
        ("yaml", BodyKind::Other("yaml".to_owned())),
    ];
    for (raw, expected) in cases {
        let parsed = BodyKind::from(raw.to_owned());
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", raw, parsed));
        }
    }
    Ok(())
}

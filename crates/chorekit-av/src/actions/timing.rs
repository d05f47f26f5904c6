//! Edits that change timing: tempo, speed, trim and audio delay.

use super::path_arg;
use std::path::Path;

/// The `atempo` filter accepts factors in `[0.5, 2.0]`; larger changes are
/// chained.
fn atempo_chain(factor: f64) -> String {
    let mut remaining = factor;
    let mut chain = Vec::new();

    while remaining > 2.0 + 1e-6 {
        chain.push("atempo=2.0".to_string());
        remaining /= 2.0;
    }
    while remaining < 0.5 - 1e-6 {
        chain.push("atempo=0.5".to_string());
        remaining /= 0.5;
    }
    if (remaining - 1.0).abs() > 1e-6 || chain.is_empty() {
        chain.push(format!("atempo={remaining}"));
    }

    chain.join(",")
}

pub(super) fn tempo_args(input: &Path, output: &Path, factor: f64, reference: f64) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-filter:v".into(),
        format!("setpts=PTS/{factor}"),
        "-filter:a".into(),
        format!("asetrate={},aresample={reference}", reference * factor),
        path_arg(output),
    ]
}

pub(super) fn speed_args(input: &Path, output: &Path, factor: f64) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-filter:v".into(),
        format!("setpts=PTS/{factor}"),
        "-filter:a".into(),
        atempo_chain(factor),
        path_arg(output),
    ]
}

pub(super) fn trim_args(input: &Path, output: &Path, start: &str, end: Option<&str>) -> Vec<String> {
    let mut args = vec!["-i".into(), path_arg(input), "-ss".into(), start.to_string()];
    if let Some(end) = end {
        args.extend(["-to".into(), end.to_string()]);
    }
    args.extend(["-c".into(), "copy".into(), path_arg(output)]);
    args
}

pub(super) fn delay_args(input: &Path, output: &Path, seconds: f64) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-itsoffset".into(),
        seconds.to_string(),
        "-i".into(),
        path_arg(input),
        "-map".into(),
        "0:v".into(),
        "-map".into(),
        "1:a".into(),
        "-c".into(),
        "copy".into(),
        path_arg(output),
    ]
}

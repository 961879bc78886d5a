use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use shakesense::{DetectorConfig, Gesture, GestureDetector, Platform, Sample, Vec3};

#[derive(Clone, Copy)]
struct ReplaySample {
    ms: u32,
    accel: Sample,
}

struct ReplayPlatform {
    current: ReplaySample,
}

impl Platform for ReplayPlatform {
    fn update_accelerometer(&mut self) {}

    fn accel_sample(&mut self) -> Sample {
        self.current.accel
    }

    fn system_time(&mut self) -> u32 {
        self.current.ms
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let samples = parse_trace(&trace_path)?;
    let Some(&first) = samples.first() else {
        return Err("trace is empty".into());
    };

    let mut detector = GestureDetector::new(DetectorConfig::default())
        .map_err(|e| format!("bad detector config: {e:?}"))?;
    let mut platform = ReplayPlatform { current: first };
    detector.init(&mut platform);

    let mut events: Vec<(u32, Gesture)> = Vec::new();
    for &sample in &samples[1..] {
        platform.current = sample;
        detector.system_tick(&mut platform);
        let gesture = detector.current_gesture();
        if gesture != Gesture::None {
            events.push((sample.ms, gesture));
        }
    }

    for (ms, gesture) in &events {
        println!("{ms}\t{gesture:?}\t{}", gesture.code());
    }

    if let Some(expect_path) = expect_path {
        check_expectations(&expect_path, &events)?;
        println!("ok: {} events matched", events.len());
    }
    Ok(())
}

/// One sample per line: `ms x y z`, whitespace-separated. Blank lines and
/// `#` comments are skipped.
fn parse_trace(path: &Path) -> Result<Vec<ReplaySample>, String> {
    let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut samples = Vec::new();

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| format!("{}: {e}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(format!("line {}: expected `ms x y z`", line_no + 1));
        }
        let ms = fields[0]
            .parse::<u32>()
            .map_err(|_| format!("line {}: bad timestamp", line_no + 1))?;
        let mut axes = [0i8; 3];
        for (slot, field) in axes.iter_mut().zip(&fields[1..]) {
            *slot = field
                .parse::<i8>()
                .map_err(|_| format!("line {}: bad axis value", line_no + 1))?;
        }
        samples.push(ReplaySample {
            ms,
            accel: Vec3::new(axes[0], axes[1], axes[2]),
        });
    }
    Ok(samples)
}

/// Expectation file: one `ms gesture` pair per line, where gesture is
/// `shake` or `tap`.
fn check_expectations(path: &Path, events: &[(u32, Gesture)]) -> Result<(), String> {
    let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut expected = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| format!("{}: {e}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let ms = fields
            .next()
            .and_then(|f| f.parse::<u32>().ok())
            .ok_or_else(|| format!("bad expectation line: {line}"))?;
        let gesture = match fields.next() {
            Some("shake") => Gesture::Shake,
            Some("tap") => Gesture::Tap,
            other => return Err(format!("bad expected gesture: {other:?}")),
        };
        expected.push((ms, gesture));
    }

    if expected != events {
        return Err(format!(
            "expectation mismatch:\n  expected {expected:?}\n  got      {events:?}"
        ));
    }
    Ok(())
}

fn usage() -> String {
    "usage: gesture_replay <trace.tsv> [--expect <events.tsv>]".into()
}

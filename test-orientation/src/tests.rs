use crate::*;

const RECORDING: &str = "\
time_ms,ax,ay,az,gx,gy,gz
1000,0,0,16384,0,0,0
1100,0,0,16384,0,0,131
1200,0,0,16384,0,0,131
";

fn replay_to_string(input: &str, config: EstimatorConfig) -> (usize, String) {
    let mut output = Vec::new();
    let rows = replay(input.as_bytes(), &mut output, config).unwrap();
    (rows, String::from_utf8(output).unwrap())
}

#[test]
fn replay_writes_one_row_per_tick() {
    let (rows, output) = replay_to_string(RECORDING, EstimatorConfig::default());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(rows, 2);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "time_ms,yaw,pitch,roll,ax,ay,az,gx,gy,gz");
    assert!(lines[1].starts_with("1100,0.1000,0.0000,"), "{}", lines[1]);
    assert!(lines[2].starts_with("1200,0.2000,0.0000,"), "{}", lines[2]);
    assert!(lines[2].ends_with(",0.0000,0.0000,1.0000,0.0000,0.0000,1.0000"), "{}", lines[2]);
}

#[test]
fn replay_skips_throttled_records() {
    let config = EstimatorConfig::default().with_min_update_interval(150);
    let (rows, output) = replay_to_string(RECORDING, config);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(rows, 1);
    // The single estimate spans both intervals.
    assert!(lines[1].starts_with("1200,0.2000,"), "{}", lines[1]);
}

#[test]
fn replay_rejects_malformed_records() {
    let input = "time_ms,ax,ay,az,gx,gy,gz\n1000,0,0,not-a-number,0,0,0\n";
    let mut output = Vec::new();
    assert!(replay(input.as_bytes(), &mut output, EstimatorConfig::default()).is_err());
}

use std::{cell::Cell, env, error::Error, fs::{self, File}, io::{Read, Write}, path::Path};
use orientation::*;

#[cfg(test)]
mod tests;

static RESULTS_DIR: &str = "analysis";

/// One line of a recording: timestamp in milliseconds followed by the raw accelerometer and
/// gyroscope registers.
type Record = (u64, i16, i16, i16, i16, i16, i16);

/// Sample source that hands out the sample queued for the current tick.
#[derive(Default)]
struct ReplaySource {
    next: Option<RawSample>,
}

#[derive(Debug)]
struct NoSampleQueued;

impl RawSampleSource for ReplaySource {
    type Error = NoSampleQueued;

    fn initialize(&mut self) -> Result<(), NoSampleQueued> {
        Ok(())
    }

    fn read_raw(&mut self) -> Result<Sample, NoSampleQueued> {
        self.next.take().map(Sample::Raw).ok_or(NoSampleQueued)
    }
}

/// Runs every record of a recording through the estimator, writing the estimate after each one.
/// The first record only starts the clock. Returns the number of rows written.
fn replay<R: Read, W: Write>(input: R, output: W, config: EstimatorConfig) -> Result<usize, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(["time_ms", "yaw", "pitch", "roll", "ax", "ay", "az", "gx", "gy", "gz"])?;

    let clock = Cell::new(0u64);
    let mut estimator = OrientationEstimator::new(ReplaySource::default(), &clock, config);

    let mut rows = 0;
    for result in reader.deserialize::<Record>() {
        let (time, ax, ay, az, gx, gy, gz) = result?;
        clock.set(time);

        if !estimator.is_ready() {
            estimator.begin()?;
            continue;
        }

        estimator.source_mut().next = Some(RawSample::new([ax, ay, az], [gx, gy, gz]));
        let estimate = match estimator.update() {
            Ok(estimate) => estimate,
            Err(orientation::Error::Throttled) => {
                log::debug!("Dropping record at {}ms, too close to the previous one", time);
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        writer.write_record(&[
            time.to_string(),
            format!("{:.4}", estimate.angles.yaw),
            format!("{:.4}", estimate.angles.pitch),
            format!("{:.4}", estimate.angles.roll),
            format!("{:.4}", estimate.accel.x),
            format!("{:.4}", estimate.accel.y),
            format!("{:.4}", estimate.accel.z),
            format!("{:.4}", estimate.gyro.x),
            format!("{:.4}", estimate.gyro.y),
            format!("{:.4}", estimate.gyro.z),
        ])?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err("Expected CSV file to read data from, optionally followed by the filter alpha".into());
    }

    let mut config = EstimatorConfig::default();
    if let Some(alpha) = args.get(2) {
        config = config.with_filter_alpha(alpha.parse()?);
    }

    // Open the input CSV file.
    let in_path = Path::new(&args[1]);
    let in_file = File::open(in_path)?;

    // Every input CSV file gets its own folder in the results directory.
    let name = in_path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("recording");
    let out_dir = format!("{}/{}", RESULTS_DIR, name);
    fs::create_dir_all(&out_dir)?;

    let out_path = format!("{}/orientation.csv", out_dir);
    let rows = replay(in_file, File::create(&out_path)?, config)?;
    log::info!("Wrote {} rows to {}", rows, out_path);
    Ok(())
}

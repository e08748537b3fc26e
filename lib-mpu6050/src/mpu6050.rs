use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use math::map_range;
use orientation::{EstimatorConfig, RawSample, RawSampleSource, Sample};

use crate::{registers::*, ClockSource, DLPFMode, Error, Mpu6050Config, Offsets, SampleMode, AccelScaleRange, GyroScaleRange, MPU6050_DEVICE_ID};
use crate::utils::*;
use crate::dmp::*;

/// Driver for the MPU6050 6-axis motion sensor, usable as a [`RawSampleSource`] either in raw
/// register mode or with the onboard DMP doing the sensor fusion.
///
pub struct Mpu6050<I, D>
{
    /// i2c channel that we actually use to communicate with the MPU6050 chip.
    i2c: I,

    /// Used for the waits the chip needs after resets and between connection attempts.
    delay: D,

    config: Mpu6050Config,

    accel_scale: AccelScaleRange,
    gyro_scale: GyroScaleRange,
}

impl<I: I2c, D: DelayNs> Mpu6050<I, D>
{
    /// Create a new MPU 6050 instance with the given I2C interface, nothing is sent to the chip
    /// until [`RawSampleSource::initialize`] is called.
    ///
    pub fn new(i2c: I, delay: D, config: Mpu6050Config) -> Self {
        Mpu6050 {
            i2c,
            delay,
            accel_scale: config.effective_accel_scale(),
            gyro_scale: config.effective_gyro_scale(),
            config,
        }
    }

    /// Gives back the i2c bus and delay.
    ///
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }

    /// Estimator settings whose scale factors match the ranges this driver programs into the chip.
    ///
    pub fn estimator_config(&self) -> EstimatorConfig {
        let interval = match self.config.mode {
            SampleMode::Raw => 0,
            SampleMode::Dmp(_) => dmp_poll_interval_ms(self.config.dmp_output_rate_hz),
        };
        EstimatorConfig::default()
            .with_scales(self.accel_scale.as_scale_factor(), self.gyro_scale.as_scale_factor())
            .with_min_update_interval(interval)
    }

    /// Brings the chip from power-on into a state where `read_raw` works, following the configured
    /// sample mode.
    ///
    pub fn setup(&mut self) -> Result<(), Error<I::Error>> {
        self.wait_for_device()?;

        log::info!("Configuring MPU6050");
        self.reset()?;
        self.set_clock_source(ClockSource::GyroX)?;

        match self.config.mode {
            SampleMode::Raw => {
                self.set_accel_scale(self.config.accel_scale)?;
                self.set_gyro_scale(self.config.gyro_scale)?;
                self.set_dlpf_mode(self.config.dlpf_mode)?;
                self.set_sample_rate_divider(self.config.sample_rate_divider)?;
                self.set_dmp_enabled(false)?;
                self.set_fifo_enabled(false)?;
            }
            SampleMode::Dmp(firmware) => self.initialize_dmp(firmware)?,
        }

        // Offsets go last, the DMP setup resets the whole chip.
        if let Some(offsets) = self.config.offsets {
            self.set_active_offsets(&offsets)?;
        }

        if let Some(loops) = self.config.calibration_loops {
            log::info!("Calibrating MPU6050, keep the device still");
            self.calibrate_accel(loops)?;
            self.calibrate_gyro(loops)?;
        }

        log::info!("MPU6050 ready");
        Ok(())
    }

    /// Polls the `WHO_AM_I` register until the expected device id shows up, using the configured
    /// retry policy. Returns the error of the last attempt when the device never shows up.
    ///
    pub fn wait_for_device(&mut self) -> Result<(), Error<I::Error>> {
        let policy = self.config.retry;
        let attempts = policy.max_attempts.max(1);

        let mut last_error = Error::WrongDevice(0);
        for attempt in 1..=attempts {
            match self.get_device_id() {
                Ok(MPU6050_DEVICE_ID) => {
                    log::debug!("Found MPU6050 after {} attempt(s)", attempt);
                    return Ok(());
                }
                Ok(id) => {
                    log::warn!("Unexpected device id {:#04x} (attempt {}/{})", id, attempt, attempts);
                    last_error = Error::WrongDevice(id);
                }
                Err(err) => {
                    log::warn!("MPU6050 not responding (attempt {}/{})", attempt, attempts);
                    last_error = err;
                }
            }
            if attempt < attempts {
                self.delay.delay_ms(policy.delay_ms);
            }
        }

        log::error!("Giving up on MPU6050 after {} attempts", attempts);
        Err(last_error)
    }

    /// Wakes the chip up from sleep, which is the state it powers on in.
    ///
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.set_register_value(PWR_MGMT_1, 0x00)?;
        self.delay.delay_ms(100);
        Ok(())
    }

    pub fn set_sleep(&mut self, sleep: bool) -> Result<(), Error<I::Error>> {
        let bits = if sleep { PWR_MGMT_1_SLEEP } else { 0 };
        self.update_register(PWR_MGMT_1, PWR_MGMT_1_SLEEP, bits)
    }

    pub fn set_accel_scale(&mut self, scale: AccelScaleRange) -> Result<(), Error<I::Error>> {
        self.update_register(ACCEL_CONFIG, 0b0001_1000, scale.as_register())?;
        self.accel_scale = scale;
        Ok(())
    }

    pub fn get_accel_scale(&mut self) -> Result<AccelScaleRange, Error<I::Error>> {
        self.accel_scale = AccelScaleRange::from_register(self.get_register_value(ACCEL_CONFIG)?);
        Ok(self.accel_scale)
    }

    pub fn set_gyro_scale(&mut self, scale: GyroScaleRange) -> Result<(), Error<I::Error>> {
        self.update_register(GYRO_CONFIG, 0b0001_1000, scale.as_register())?;
        self.gyro_scale = scale;
        Ok(())
    }

    pub fn get_gyro_scale(&mut self) -> Result<GyroScaleRange, Error<I::Error>> {
        self.gyro_scale = GyroScaleRange::from_register(self.get_register_value(GYRO_CONFIG)?);
        Ok(self.gyro_scale)
    }

    /// Set digital low-pass filter configuration
    ///
    pub fn set_dlpf_mode(&mut self, mode: DLPFMode) -> Result<(), Error<I::Error>> {
        self.update_register(CONFIG, 0b0000_0111, mode as u8)
    }

    /// Sets the sample rate based on the divider using the following formula:
    /// `1khz / (1 + divider) = sample_rate`
    ///
    /// For example: `1khz / (1 + 4) = 200 Hz`
    ///
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<I::Error>> {
        self.set_register_value(SMPLRT_DIV, divider)
    }

    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Error<I::Error>> {
        log::debug!("Setting clock source={:?}", source);
        self.update_register(PWR_MGMT_1, 0b0000_0111, source as u8)
    }

    /// Gets the device ID of this MPU6050 chip, practically speaking this just gets the contents
    /// of the `WHO_AM_I` register.
    ///
    pub fn get_device_id(&mut self) -> Result<u8, Error<I::Error>> {
        let value = self.get_register_value(WHO_AM_I)?;
        Ok((value & 0b0111_1110) >> 1)
    }

    /// Checks if the i2c connection with the MPU6050 chip is working as expected.
    ///
    pub fn connection_okay(&mut self) -> bool {
        self.get_device_id().map(|id| id == MPU6050_DEVICE_ID).unwrap_or(false)
    }

    /// Reads accelerometer and gyroscope registers in a single i2c transaction, the temperature
    /// registers in between are skipped.
    ///
    pub fn get_raw_sample(&mut self) -> Result<RawSample, Error<I::Error>> {
        let mut data = [ 0u8; SENSOR_DATA_LEN ];
        self.i2c.write_read(self.config.address, &[ ACCEL_XOUT_H ], &mut data).map_err(Error::I2c)?;
        Ok(RawSample::new(be_i16_triple(&data, 0), be_i16_triple(&data, 8)))
    }

    /// Location of the accelerometer offset registers and the distance between the axes, this
    /// differs between the MPU6050 and the newer MPU6500 family.
    ///
    fn accel_offset_registers(&mut self) -> Result<(u8, u8), Error<I::Error>> {
        if self.get_device_id()? < 0x38 { Ok((XA_OFFS_H, 2)) } else { Ok((XA_OFFS_H_6500, 3)) }
    }

    pub fn set_active_offsets(&mut self, offsets: &Offsets) -> Result<(), Error<I::Error>> {
        log::debug!("Setting offsets accel={:?} gyro={:?}", offsets.accel, offsets.gyro);
        let (accel_register, shift) = self.accel_offset_registers()?;
        for i in 0..3u8 {
            self.set_register_value_i16(accel_register + i * shift, offsets.accel[i as usize])?;
            self.set_register_value_i16(XG_OFFS_USRH + i * 2, offsets.gyro[i as usize])?;
        }
        Ok(())
    }

    pub fn get_active_offsets(&mut self) -> Result<Offsets, Error<I::Error>> {
        let (accel_register, shift) = self.accel_offset_registers()?;
        let mut offsets = Offsets::default();
        for i in 0..3u8 {
            offsets.accel[i as usize] = self.get_register_value_i16(accel_register + i * shift)?;
            offsets.gyro[i as usize] = self.get_register_value_i16(XG_OFFS_USRH + i * 2)?;
        }
        Ok(offsets)
    }

    pub fn calibrate_gyro(&mut self, loops: u8) -> Result<(), Error<I::Error>> {
        let x = (100.0 - map_range(loops as f64, 1.0, 5.0, 20.0, 0.0)) * 0.01;
        self.pid(GYRO_XOUT_H, 0.3 * x, 90.0 * x, loops)
    }

    pub fn calibrate_accel(&mut self, loops: u8) -> Result<(), Error<I::Error>> {
        let x = (100.0 - map_range(loops as f64, 1.0, 5.0, 20.0, 0.0)) * 0.01;
        self.pid(ACCEL_XOUT_H, 0.3 * x, 20.0 * x, loops)
    }

    /// Drives the readings of either sensor to zero (or 1g on the accelerometer z-axis) by
    /// adjusting the offset registers with a PI controller, the same approach as the `i2cdevlib`
    /// `CalibrateAccel`/`CalibrateGyro` functions. Every loop runs at most 100 iterations and
    /// ends early once the error stays small, the gains shrink after every loop.
    ///
    fn pid(&mut self, read_register: u8, mut kp: f64, mut ki: f64, loops: u8) -> Result<(), Error<I::Error>> {
        let is_accel = read_register == ACCEL_XOUT_H;
        let (save_register, shift) = if is_accel {
            self.accel_offset_registers()?
        } else {
            (XG_OFFS_USRH, 2)
        };

        // The accelerometer offsets store something else in bit 0 which has to survive, and they
        // are in different units than the gyroscope offsets.
        let divisor = if is_accel { 8.0 } else { 4.0 };
        let gravity = if is_accel {
            (16384u16 >> (self.get_accel_scale()? as u8)) as f64
        } else {
            0.0
        };

        let mut bit_zero = [0i16; 3];
        let mut i_term = [0.0f64; 3];
        for i in 0..3usize {
            let data = self.get_register_value_i16(save_register + (i as u8) * shift)?;
            if is_accel {
                bit_zero[i] = data & 1;
            }
            i_term[i] = data as f64 * divisor;
        }

        let to_offset = |value: f64, bit_zero: i16| -> i16 {
            let data = libm::round(value / divisor) as i16;
            if is_accel { (data & !1) | bit_zero } else { data }
        };

        for _ in 0..loops {
            let mut good_samples = 0u8;
            for c in 0..100u8 {
                let mut error_sum = 0.0f64;
                for i in 0..3usize {
                    let mut reading = self.get_register_value_i16(read_register + (i as u8) * 2)? as f64;
                    if is_accel && i == 2 {
                        reading -= gravity;
                    }
                    let error = -reading;
                    error_sum += libm::fabs(reading);
                    let p_term = kp * error;
                    // Integral term assumes 1000 iterations a second.
                    i_term[i] += error * 0.001 * ki;
                    let offset = to_offset(p_term + i_term[i], bit_zero[i]);
                    self.set_register_value_i16(save_register + (i as u8) * shift, offset)?;
                }

                let weighted = if is_accel { error_sum * 0.05 } else { error_sum };
                if weighted < 5.0 {
                    good_samples = good_samples.saturating_add(1);
                }
                if error_sum < 100.0 && c > 10 && good_samples >= 10 {
                    break;
                }
                self.delay.delay_ms(1);
            }
            log::debug!("Calibration loop done");

            kp *= 0.75;
            ki *= 0.75;
            for i in 0..3usize {
                let offset = to_offset(i_term[i], bit_zero[i]);
                self.set_register_value_i16(save_register + (i as u8) * shift, offset)?;
            }
        }

        self.reset_fifo()?;
        self.reset_dmp()
    }

    /// Uploads the firmware image and configures the DMP (Digital Motion Processor) so fused
    /// packets show up in the FIFO. This needs to be done every time the sensor boots up since the
    /// DMP memory is volatile.
    ///
    /// The register sequence follows `MPU6050_6Axis_MotionApps612::dmpInitialize()` in Jeff
    /// Rowberg's `i2cdevlib`.
    ///
    pub fn initialize_dmp(&mut self, firmware: &[u8]) -> Result<(), Error<I::Error>> {
        log::info!("Initializing DMP with {} byte firmware", firmware.len());

        self.set_register_value(PWR_MGMT_1, PWR_MGMT_1_DEVICE_RESET)?;
        self.delay.delay_ms(100);
        // The reset puts the chip to sleep, writing the whole register wakes it up again.
        self.set_register_value(PWR_MGMT_1, ClockSource::GyroX as u8)?;
        self.set_register_value(INT_ENABLE, 0x00)?;
        self.set_register_value(FIFO_EN, 0x00)?;
        self.set_accel_scale(AccelScaleRange::G2)?;
        self.set_register_value(INT_PIN_CFG, 0x80)?;
        self.set_sample_rate_divider(self.config.sample_rate_divider)?;
        self.set_dlpf_mode(DLPFMode::Bw188Hz)?;

        self.write_memory_block(firmware, 0, 0)?;

        let rate = self.config.dmp_output_rate_hz;
        let divisor = dmp_rate_divisor(rate);
        log::debug!("Setting DMP output rate to {}Hz (divisor {})", rate, divisor);
        self.write_memory_block(&divisor.to_be_bytes(), DMP_FIFO_RATE_BANK, DMP_FIFO_RATE_ADDRESS)?;

        let [start_high, start_low] = DMP_START_ADDRESS.to_be_bytes();
        self.set_register_value(DMP_CFG_1, start_high)?;
        self.set_register_value(DMP_CFG_2, start_low)?;

        self.set_gyro_scale(GyroScaleRange::D2000)?;

        self.set_register_value(USER_CTRL, USER_CTRL_DMP_EN | USER_CTRL_FIFO_EN)?;
        log::debug!("Enabling DMP interrupt");
        self.set_register_value(INT_ENABLE, 0b0000_0010)?;
        self.reset_fifo()?;

        // Clear interrupt flags.
        self.get_register_value(INT_STATUS)?;

        log::info!("Finished setting up DMP");
        Ok(())
    }

    /// Check if the DMP (Digital Motion Processor) is enabled.
    ///
    pub fn get_dmp_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.get_register_value(USER_CTRL)? & USER_CTRL_DMP_EN > 0)
    }

    /// Enable or disable the DMP (Digital Motion Processor).
    ///
    pub fn set_dmp_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        let bits = if enabled { USER_CTRL_DMP_EN } else { 0 };
        self.update_register(USER_CTRL, USER_CTRL_DMP_EN, bits)
    }

    pub fn set_fifo_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        let bits = if enabled { USER_CTRL_FIFO_EN } else { 0 };
        self.update_register(USER_CTRL, USER_CTRL_FIFO_EN, bits)
    }

    /// Empties the FIFO buffer, the bit clears itself once the reset is done.
    ///
    pub fn reset_fifo(&mut self) -> Result<(), Error<I::Error>> {
        self.update_register(USER_CTRL, USER_CTRL_FIFO_RESET, USER_CTRL_FIFO_RESET)
    }

    pub fn reset_dmp(&mut self) -> Result<(), Error<I::Error>> {
        log::debug!("Reset DMP");
        self.update_register(USER_CTRL, USER_CTRL_DMP_RESET, USER_CTRL_DMP_RESET)
    }

    /// Gets the number of bytes currently available inside FIFO buffer.
    ///
    pub fn get_fifo_count(&mut self) -> Result<u16, Error<I::Error>> {
        let mut data = [ 0u8; 2 ];
        self.i2c.write_read(self.config.address, &[ FIFO_COUNT_H ], &mut data).map_err(Error::I2c)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Reads the newest complete DMP packet from the FIFO, older packets still in the queue are
    /// dropped. The FIFO is reset when it overflowed since packet boundaries are lost by then.
    ///
    pub fn get_dmp_packet(&mut self) -> Result<DMPPacket, Error<I::Error>> {
        let status = self.get_register_value(INT_STATUS)?;
        let count = self.get_fifo_count()?;
        if status & INT_STATUS_FIFO_OFLOW > 0 || count >= FIFO_SIZE {
            log::warn!("FIFO overflow with {} bytes queued, resetting", count);
            self.reset_fifo()?;
            return Err(Error::FifoOverflow);
        }
        if count < DMP_PACKET_SIZE {
            return Err(Error::NoPacket);
        }

        let mut bs = [ 0u8; DMP_PACKET_SIZE as usize ];
        for _ in 0..(count / DMP_PACKET_SIZE) {
            self.i2c.write_read(self.config.address, &[ FIFO_R_W ], &mut bs).map_err(Error::I2c)?;
        }
        Ok(DMPPacket::parse(&bs))
    }

    pub fn get_register_value(&mut self, register: u8) -> Result<u8, Error<I::Error>> {
        let mut state = [ 0u8 ];
        self.i2c.write_read(self.config.address, &[ register ], &mut state).map_err(Error::I2c)?;
        Ok(state[0])
    }

    pub fn set_register_value(&mut self, register: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.i2c.write(self.config.address, &[ register, value ]).map_err(Error::I2c)
    }

    /// Read-modify-write of the bits selected by `mask`, other bits keep their value.
    ///
    pub fn update_register(&mut self, register: u8, mask: u8, bits: u8) -> Result<(), Error<I::Error>> {
        let state = self.get_register_value(register)?;
        self.set_register_value(register, (state & !mask) | (bits & mask))
    }

    /// Reads a signed 16 bit integer from the register and the next register, i.e. to read the
    /// ACCEL_XOUT_H and ACCEL_XOUT_L registers (at 0x3B and 0x3C respectively), you should call
    /// this method with ACCEL_XOUT_H as argument.
    ///
    pub fn get_register_value_i16(&mut self, register: u8) -> Result<i16, Error<I::Error>> {
        let mut state = [ 0u8, 0u8 ];
        self.i2c.write_read(self.config.address, &[ register ], &mut state).map_err(Error::I2c)?;
        Ok(i16::from_be_bytes(state))
    }

    pub fn set_register_value_i16(&mut self, register: u8, value: i16) -> Result<(), Error<I::Error>> {
        let value = value.to_be_bytes();
        self.i2c.write(self.config.address, &[ register, value[0], value[1] ]).map_err(Error::I2c)
    }

    fn write_memory_block(&mut self, data: &[u8], bank: u8, address: u8) -> Result<(), Error<I::Error>> {
        let start = bank as usize * DMP_MEMORY_BANK_SIZE as usize + address as usize;
        if start + data.len() > DMP_MEMORY_BANKS * DMP_MEMORY_BANK_SIZE as usize {
            log::error!("Cannot write {} bytes of DMP memory starting at bank {}, address {}", data.len(), bank, address);
            return Err(Error::FirmwareTooLarge(data.len()));
        }

        let mut written: usize = 0;
        let mut bank = bank;
        let mut address = address as u16;

        while written < data.len() {
            let remaining = data.len() - written;
            let left_in_bank = (DMP_MEMORY_BANK_SIZE - address) as usize;
            let chunk_size = usize::min(DMP_MEMORY_CHUNK_SIZE, usize::min(remaining, left_in_bank));
            let chunk = &data[written..written + chunk_size];

            self.set_memory_bank(bank)?;
            self.set_memory_start_address(address as u8)?;

            let mut buf = [0u8; DMP_MEMORY_CHUNK_SIZE + 1];
            buf[0] = DMP_MEM_R_W;
            buf[1..=chunk_size].copy_from_slice(chunk);
            self.i2c.write(self.config.address, &buf[..=chunk_size]).map_err(Error::I2c)?;

            if cfg!(feature = "verify-firmware") {
                self.verify_memory_chunk(chunk, bank, address as u8)?;
            }

            written += chunk_size;
            address += chunk_size as u16;
            if address >= DMP_MEMORY_BANK_SIZE {
                log::debug!("Finished writing to bank: {}", bank);
                address = 0;
                bank += 1;
            }
        }
        log::debug!("Wrote {} bytes of DMP memory", written);
        Ok(())
    }

    fn verify_memory_chunk(&mut self, chunk: &[u8], bank: u8, address: u8) -> Result<(), Error<I::Error>> {
        self.set_memory_bank(bank)?;
        self.set_memory_start_address(address)?;

        let mut verify = [0u8; DMP_MEMORY_CHUNK_SIZE];
        let verify = &mut verify[..chunk.len()];
        self.i2c.write_read(self.config.address, &[ DMP_MEM_R_W ], verify).map_err(Error::I2c)?;

        if let Some(i) = chunk.iter().zip(verify.iter()).position(|(a, b)| a != b) {
            let address = address.wrapping_add(i as u8);
            log::error!(
                "Verify of mem data failed: bank {}, address {}: found {} expected {}",
                bank, address, verify[i], chunk[i]
            );
            return Err(Error::FirmwareMismatch { bank, address });
        }
        Ok(())
    }

    fn set_memory_start_address(&mut self, address: u8) -> Result<(), Error<I::Error>> {
        self.set_register_value(DMP_MEM_START_ADDR, address)
    }

    fn set_memory_bank(&mut self, bank: u8) -> Result<(), Error<I::Error>> {
        self.set_register_value(DMP_BANK_SEL, bank & 0x1F)
    }
}

impl<I: I2c, D: DelayNs> RawSampleSource for Mpu6050<I, D>
{
    type Error = Error<I::Error>;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.setup()
    }

    fn read_raw(&mut self) -> Result<Sample, Self::Error> {
        match self.config.mode {
            SampleMode::Raw => Ok(Sample::Raw(self.get_raw_sample()?)),
            SampleMode::Dmp(_) => Ok(self.get_dmp_packet()?.into()),
        }
    }
}

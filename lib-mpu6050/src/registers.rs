pub const XA_OFFS_H: u8 = 0x06; //[15:0] XA_OFFS, MPU6050 only
pub const XA_OFFS_H_6500: u8 = 0x77; //[15:0] XA_OFFS, MPU6500 family, 3 bytes between axes

pub const XG_OFFS_USRH: u8 = 0x13; //[15:0] XG_OFFS_USR

pub const SMPLRT_DIV: u8 = 0x19;

pub const CONFIG: u8 = 0x1A; //[5:3] EXT_SYNC_SET, [2:0] DLPF_CFG
pub const GYRO_CONFIG: u8 = 0x1B; //[4:3] FS_SEL
pub const ACCEL_CONFIG: u8 = 0x1C; //[4:3] AFS_SEL

pub const FIFO_EN: u8 = 0x23;

pub const INT_PIN_CFG: u8 = 0x37;
pub const INT_ENABLE: u8 = 0x38;
pub const INT_STATUS: u8 = 0x3A; //[4] FIFO_OFLOW_INT, [1] DMP_INT, [0] DATA_RDY_INT

pub const ACCEL_XOUT_H: u8 = 0x3B;
pub const GYRO_XOUT_H: u8 = 0x43;

pub const USER_CTRL: u8 = 0x6A; //[7] DMP_EN, [6] FIFO_EN, [3] DMP_RESET, [2] FIFO_RESET
pub const PWR_MGMT_1: u8 = 0x6B; //[7] DEVICE_RESET, [6] SLEEP, [2:0] CLKSEL

pub const DMP_BANK_SEL: u8 = 0x6D;
pub const DMP_MEM_START_ADDR: u8 = 0x6E;
pub const DMP_MEM_R_W: u8 = 0x6F;
pub const DMP_CFG_1: u8 = 0x70; // program start address, high byte
pub const DMP_CFG_2: u8 = 0x71; // program start address, low byte

pub const FIFO_COUNT_H: u8 = 0x72;
pub const FIFO_R_W: u8 = 0x74;

pub const WHO_AM_I: u8 = 0x75;

/// Size of the burst read from `ACCEL_XOUT_H`: accelerometer, temperature and gyroscope.
pub const SENSOR_DATA_LEN: usize = 6 + 2 + 6;

pub const USER_CTRL_DMP_EN: u8 = 0b1000_0000;
pub const USER_CTRL_FIFO_EN: u8 = 0b0100_0000;
pub const USER_CTRL_DMP_RESET: u8 = 0b0000_1000;
pub const USER_CTRL_FIFO_RESET: u8 = 0b0000_0100;

pub const PWR_MGMT_1_DEVICE_RESET: u8 = 0b1000_0000;
pub const PWR_MGMT_1_SLEEP: u8 = 0b0100_0000;

pub const INT_STATUS_FIFO_OFLOW: u8 = 0b0001_0000;

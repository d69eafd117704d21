//! Decoded telemetry model for the LTC4162.
//!
//! Raw register words become closed enums, independent bitfield flags and
//! scaled analog readings. Every enum decode is total over the 16-bit domain:
//! a word that matches no known key is an explicit [`DecodeError`] carrying
//! the raw value, never a silent default.

use std::fmt;

use thiserror::Error;

/// A register word did not match any known key for its field.
///
/// Decode failures are recoverable and informative on their own: the
/// offending field is rendered as `unknown(<raw>)` while the rest of the
/// snapshot stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown chemistry code {code}")]
    UnknownChemistry { code: u8 },
    #[error("unknown charger state 0x{raw:04X}")]
    UnknownChargerState { raw: u16 },
    #[error("unknown charger status 0x{raw:04X}")]
    UnknownChargerStatus { raw: u16 },
}

impl DecodeError {
    /// The register value, as read, that failed to decode.
    pub fn raw(&self) -> u16 {
        match *self {
            DecodeError::UnknownChemistry { code } => u16::from(code),
            DecodeError::UnknownChargerState { raw } => raw,
            DecodeError::UnknownChargerStatus { raw } => raw,
        }
    }
}

/// Battery chemistry and charge-voltage family the chip is built for.
///
/// Encoded as a 4-bit code in the high byte of `CHEM_CELLS_REG`. Code 7 and
/// codes 10-15 are reserved and decode to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chemistry {
    Ltc4162Lad,
    Ltc4162L42,
    Ltc4162L41,
    Ltc4162L40,
    Ltc4162Fad,
    Ltc4162Ffs,
    Ltc4162Fst,
    Ltc4162Sst,
    Ltc4162Sad,
}

impl Chemistry {
    /// Decode the 4-bit chemistry code.
    pub fn from_code(code: u8) -> Result<Self, DecodeError> {
        match code {
            0 => Ok(Chemistry::Ltc4162Lad),
            1 => Ok(Chemistry::Ltc4162L42),
            2 => Ok(Chemistry::Ltc4162L41),
            3 => Ok(Chemistry::Ltc4162L40),
            4 => Ok(Chemistry::Ltc4162Fad),
            5 => Ok(Chemistry::Ltc4162Ffs),
            6 => Ok(Chemistry::Ltc4162Fst),
            8 => Ok(Chemistry::Ltc4162Sst),
            9 => Ok(Chemistry::Ltc4162Sad),
            _ => Err(DecodeError::UnknownChemistry { code }),
        }
    }

    /// Datasheet device name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chemistry::Ltc4162Lad => "LTC4162_LAD",
            Chemistry::Ltc4162L42 => "LTC4162_L42",
            Chemistry::Ltc4162L41 => "LTC4162_L41",
            Chemistry::Ltc4162L40 => "LTC4162_L40",
            Chemistry::Ltc4162Fad => "LTC4162_FAD",
            Chemistry::Ltc4162Ffs => "LTC4162_FFS",
            Chemistry::Ltc4162Fst => "LTC4162_FST",
            Chemistry::Ltc4162Sst => "LTC4162_SST",
            Chemistry::Ltc4162Sad => "LTC4162_SAD",
        }
    }
}

impl fmt::Display for Chemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chemistry code and detected cell count from `CHEM_CELLS_REG`.
///
/// The detected count is informational only. The chip stops reporting it
/// reliably when the system runs on battery alone, so conversions use the
/// operator-supplied count instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub chemistry: Result<Chemistry, DecodeError>,
    pub detected_cell_count: u8,
}

impl DeviceIdentity {
    pub fn from_raw(raw: u16) -> Self {
        DeviceIdentity {
            chemistry: Chemistry::from_code(((raw >> 8) & 0xF) as u8),
            detected_cell_count: (raw & 0xF) as u8,
        }
    }
}

/// Position of the charging state machine, one active bit in the low 13 bits
/// of `CHARGER_STATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargerState {
    BatShortFault,
    BatMissingFault,
    MaxChargeTimeFault,
    COverXTerm,
    TimerTerm,
    NtcPause,
    CcCvCharge,
    ChargerSuspended,
    AbsorbCharge,
    BatteryDetection,
    BatDetectFailedFault,
}

impl ChargerState {
    pub const MASK: u16 = 0x1FFF;

    /// Decode the state register. Exactly one defined bit must be set in the
    /// masked word; zero, multiple or undefined bits are an error.
    pub fn from_raw(raw: u16) -> Result<Self, DecodeError> {
        match raw & Self::MASK {
            0x0001 => Ok(ChargerState::BatShortFault),
            0x0002 => Ok(ChargerState::BatMissingFault),
            0x0004 => Ok(ChargerState::MaxChargeTimeFault),
            0x0008 => Ok(ChargerState::COverXTerm),
            0x0010 => Ok(ChargerState::TimerTerm),
            0x0020 => Ok(ChargerState::NtcPause),
            0x0040 => Ok(ChargerState::CcCvCharge),
            0x0100 => Ok(ChargerState::ChargerSuspended),
            0x0200 => Ok(ChargerState::AbsorbCharge),
            0x0800 => Ok(ChargerState::BatteryDetection),
            0x1000 => Ok(ChargerState::BatDetectFailedFault),
            _ => Err(DecodeError::UnknownChargerState { raw }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChargerState::BatShortFault => "bat_short_fault",
            ChargerState::BatMissingFault => "bat_missing_fault",
            ChargerState::MaxChargeTimeFault => "max_charge_time_fault",
            ChargerState::COverXTerm => "c_over_x_term",
            ChargerState::TimerTerm => "timer_term",
            ChargerState::NtcPause => "ntc_pause",
            ChargerState::CcCvCharge => "cc_cv_charge",
            ChargerState::ChargerSuspended => "charger_suspended",
            ChargerState::AbsorbCharge => "absorb_charge",
            ChargerState::BatteryDetection => "battery_detection",
            ChargerState::BatDetectFailedFault => "bat_detect_failed_fault",
        }
    }
}

impl fmt::Display for ChargerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active regulation mode, one active bit in the low 6 bits of
/// `CHARGE_STATUS`. All bits clear means the charger is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargerStatus {
    ChargerOff,
    ConstantVoltage,
    ConstantCurrent,
    IinLimitActive,
    VinUvclActive,
    ThermalRegActive,
    IlimRegActive,
}

impl ChargerStatus {
    pub const MASK: u16 = 0x003F;

    pub fn from_raw(raw: u16) -> Result<Self, DecodeError> {
        match raw & Self::MASK {
            0x0000 => Ok(ChargerStatus::ChargerOff),
            0x0001 => Ok(ChargerStatus::ConstantVoltage),
            0x0002 => Ok(ChargerStatus::ConstantCurrent),
            0x0004 => Ok(ChargerStatus::IinLimitActive),
            0x0008 => Ok(ChargerStatus::VinUvclActive),
            0x0010 => Ok(ChargerStatus::ThermalRegActive),
            0x0020 => Ok(ChargerStatus::IlimRegActive),
            _ => Err(DecodeError::UnknownChargerStatus { raw }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChargerStatus::ChargerOff => "charger_off",
            ChargerStatus::ConstantVoltage => "constant_voltage",
            ChargerStatus::ConstantCurrent => "constant_current",
            ChargerStatus::IinLimitActive => "iin_limit_active",
            ChargerStatus::VinUvclActive => "vin_uvcl_active",
            ChargerStatus::ThermalRegActive => "thermal_reg_active",
            ChargerStatus::IlimRegActive => "ilim_reg_active",
        }
    }
}

impl fmt::Display for ChargerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Telemetry conversion cadence selected by `CONFIG_BITS_REG` bit 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetrySpeed {
    High,
    Low,
}

impl TelemetrySpeed {
    pub fn from_bit(high: bool) -> Self {
        if high {
            TelemetrySpeed::High
        } else {
            TelemetrySpeed::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetrySpeed::High => "tel_high_speed",
            TelemetrySpeed::Low => "tel_low_speed",
        }
    }
}

impl fmt::Display for TelemetrySpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn bit(raw: u16, n: u8) -> bool {
    (raw >> n) & 1 == 1
}

/// Charger feature enables from `CHARGER_CONFIG_BITS_REG`.
///
/// Unlike the state and status registers these are independent booleans, not
/// mutually exclusive positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargerConfigBits {
    pub raw: u16,
    pub en_c_over_x_term: bool,
    pub en_jeita: bool,
}

impl ChargerConfigBits {
    pub fn from_raw(raw: u16) -> Self {
        ChargerConfigBits {
            raw,
            en_c_over_x_term: bit(raw, 2),
            en_jeita: bit(raw, 0),
        }
    }
}

/// Operating mode switches from `CONFIG_BITS_REG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigBits {
    pub raw: u16,
    pub suspend_charger: bool,
    pub run_bsr: bool,
    pub telemetry_speed: TelemetrySpeed,
    pub force_telemetry_on: bool,
    pub mppt_en: bool,
}

impl ConfigBits {
    pub fn from_raw(raw: u16) -> Self {
        ConfigBits {
            raw,
            suspend_charger: bit(raw, 5),
            run_bsr: bit(raw, 4),
            telemetry_speed: TelemetrySpeed::from_bit(bit(raw, 3)),
            force_telemetry_on: bit(raw, 2),
            mppt_en: bit(raw, 1),
        }
    }
}

/// System-level condition flags from `SYSTEM_STATUS_REG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemStatusBits {
    pub raw: u16,
    pub en_chg: bool,
    pub cell_count_err: bool,
    pub no_rt: bool,
    pub thermal_shutdown: bool,
    pub vin_ovlo: bool,
    pub vin_gt_vbat: bool,
    pub vin_gt_4p2v: bool,
    pub intvcc_gt_2p8v: bool,
}

impl SystemStatusBits {
    pub fn from_raw(raw: u16) -> Self {
        SystemStatusBits {
            raw,
            en_chg: bit(raw, 8),
            cell_count_err: bit(raw, 7),
            no_rt: bit(raw, 5),
            thermal_shutdown: bit(raw, 4),
            vin_ovlo: bit(raw, 3),
            vin_gt_vbat: bit(raw, 2),
            vin_gt_4p2v: bit(raw, 1),
            intvcc_gt_2p8v: bit(raw, 0),
        }
    }
}

/// Scaled analog telemetry for one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogReadings {
    /// Programmed charge current in amps.
    pub charge_current_setting: f64,
    /// Programmed charge voltage target in volts.
    pub vcharge_setting: f64,
    /// Die temperature in degrees Celsius.
    pub die_temperature: f64,
    /// Recharge threshold in volts.
    pub vrecharge: f64,
    /// Input voltage in volts.
    pub input_voltage: f64,
    /// Input current in amps.
    pub input_current: f64,
    /// System output voltage in volts.
    pub output_voltage: f64,
    /// Battery voltage in volts.
    pub battery_voltage: f64,
    /// Battery current in amps, negative while discharging.
    pub battery_current: f64,
}

/// Power figures derived from the analog readings.
///
/// Battery power is only meaningful while the battery is actively sinking a
/// measurable charge current, so it (and everything derived from it) is
/// reported as not-applicable unless both factors are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPower {
    /// Input power in watts.
    pub input_power: f64,
    /// Battery power in watts, when both voltage and current are positive.
    pub battery_power: Option<f64>,
    /// Charger efficiency in percent.
    pub efficiency: Option<f64>,
    /// Power dissipated as heat in watts.
    pub heat_power: Option<f64>,
}

impl DerivedPower {
    pub fn from_readings(readings: &AnalogReadings) -> Self {
        let input_power = readings.input_voltage * readings.input_current;
        let battery_power = (readings.battery_voltage > 0.0 && readings.battery_current > 0.0)
            .then(|| readings.battery_voltage * readings.battery_current);
        DerivedPower {
            input_power,
            battery_power,
            efficiency: battery_power.map(|p| p / input_power * 100.0),
            heat_power: battery_power.map(|p| input_power - p),
        }
    }
}

/// One fully decoded poll cycle. Immutable once built, consumed exactly once
/// by the renderer, never retained.
///
/// Enum fields keep their decode result so a single unexpected register value
/// stays visible without discarding the rest of the cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub identity: DeviceIdentity,
    pub charger_state: Result<ChargerState, DecodeError>,
    pub charger_status: Result<ChargerStatus, DecodeError>,
    pub charger_config: ChargerConfigBits,
    pub config_bits: ConfigBits,
    pub system_status: SystemStatusBits,
    pub readings: AnalogReadings,
    pub power: DerivedPower,
}

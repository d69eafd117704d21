//! Unit conversions from raw register words to physical values.
//!
//! Pure and stateless. The charge current and battery voltage scales depend
//! on operator-supplied context (shunt resistance, series cell count) because
//! the chip cannot know the former and stops reporting the latter reliably on
//! battery-only power.

/// Programmed charge current in amps.
///
/// The low 5 bits select the servo target; LSB = 1 mV across the battery
/// shunt, so the current scale is set by `rsense_ohms`.
pub fn charge_current_setting(raw: u16, rsense_ohms: f64) -> f64 {
    (f64::from(raw & 0x1F) + 1.0) * 0.001 / rsense_ohms
}

/// Programmed charge voltage target in volts. LSB = 12.5 mV/cell above the
/// 3.4125 V/cell base.
pub fn vcharge_setting(raw: u16, cells: u8) -> f64 {
    f64::from(cells) * (f64::from(raw) * 0.0125 + 3.4125)
}

/// Die temperature in degrees Celsius. LSB = 0.0215 degC, offset -264.4.
pub fn die_temperature(raw: u16) -> f64 {
    f64::from(raw) * 0.0215 - 264.4
}

/// Recharge threshold voltage in volts, scaled to the full pack.
pub fn vrecharge(raw: u16, cells: u8) -> f64 {
    f64::from(raw) / 18191.0 * 3.5 * f64::from(cells)
}

/// Input voltage in volts. LSB = 1.649 mV.
pub fn input_voltage(raw: u16) -> f64 {
    f64::from(raw) * 1.649 / 1000.0
}

/// Input current in amps. LSB = 146.6 uA.
pub fn input_current(raw: u16) -> f64 {
    f64::from(raw) * 1.466 / 10000.0
}

/// System output voltage in volts. LSB = 1.653 mV.
pub fn output_voltage(raw: u16) -> f64 {
    f64::from(raw) * 1.653 / 1000.0
}

/// Battery voltage in volts. LSB = 192.4 uV/cell.
pub fn battery_voltage(raw: u16, cells: u8) -> f64 {
    f64::from(raw) * f64::from(cells) * 0.1924 / 1000.0
}

/// Battery current in amps, negative while discharging.
///
/// The register is a 16-bit two's-complement quantity: words at or above
/// 0x8000 mean `raw - 0x10000`. LSB = 146.6 uA.
pub fn battery_current(raw: u16) -> f64 {
    f64::from(raw as i16) * 1.466 / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_battery_current_is_twos_complement() {
        assert!(close(battery_current(0x0000), 0.0));
        assert!(close(battery_current(0x0001), 0.0001466));
        assert!(close(battery_current(0x8000), -32768.0 * 1.466 / 10000.0));
        assert!(close(battery_current(0xFFFF), -0.0001466));
        assert!(close(battery_current(0x7FFF), 32767.0 * 1.466 / 10000.0));
    }

    #[test]
    fn test_charge_current_setting_uses_low_five_bits() {
        // 10 mOhm shunt: code 31 -> 3.2 A, code 0 -> 0.1 A
        assert!(close(charge_current_setting(31, 0.01), 3.2));
        assert!(close(charge_current_setting(0, 0.01), 0.1));
        // bits above the field are ignored
        assert!(close(charge_current_setting(0xFFE0 | 31, 0.01), 3.2));
        // the scale follows the shunt
        assert!(close(charge_current_setting(31, 0.02), 1.6));
    }

    #[test]
    fn test_vcharge_setting_scales_per_cell() {
        assert!(close(vcharge_setting(0, 1), 3.4125));
        assert!(close(vcharge_setting(31, 4), 4.0 * (31.0 * 0.0125 + 3.4125)));
    }

    #[test]
    fn test_die_temperature_offset() {
        assert!(close(die_temperature(0), -264.4));
        // room temperature is mid-scale, around code 13321
        assert!(close(die_temperature(13321), 13321.0 * 0.0215 - 264.4));
    }

    #[test]
    fn test_analog_scales() {
        assert!(close(input_voltage(1000), 1.649));
        assert!(close(input_current(10000), 1.466));
        assert!(close(output_voltage(1000), 1.653));
        assert!(close(battery_voltage(1000, 4), 1000.0 * 4.0 * 0.1924 / 1000.0));
        assert!(close(vrecharge(18191, 4), 3.5 * 4.0));
    }
}

//! Charger telemetry source
//!
//! Issues one read per register-catalog entry through the bus collaborator,
//! applies the unit conversions and assembles one [`TelemetrySnapshot`].

use anyhow::{Context, Result};
use log::debug;

use ltc4162::registers::{self, Register};
use ltc4162::telemetry::{
    AnalogReadings, ChargerConfigBits, ChargerState, ChargerStatus, ConfigBits, DerivedPower,
    DeviceIdentity, SystemStatusBits, TelemetrySnapshot,
};
use ltc4162::units;

use crate::core::RegisterBus;

/// Builds one snapshot per poll cycle from serial register reads.
///
/// Reads are not batched: the bus protocol addresses one register per
/// transaction. Any single read failure aborts the snapshot for that cycle
/// rather than producing a partially-filled result; enum decode failures do
/// not abort and stay visible in the snapshot instead.
pub struct ChargerSource {
    rsense_ohms: f64,
    cell_count: u8,
}

impl ChargerSource {
    /// `rsense_ohms` is the battery shunt resistance; `cell_count` is the
    /// operator-supplied series cell count used for all voltage scaling.
    pub fn new(rsense_ohms: f64, cell_count: u8) -> Self {
        ChargerSource {
            rsense_ohms,
            cell_count,
        }
    }

    fn read(&self, bus: &mut dyn RegisterBus, reg: Register) -> Result<u16> {
        bus.read_register(reg.addr)
            .with_context(|| format!("reading {} (0x{:02X})", reg.name, reg.addr))
    }

    /// Perform one full poll cycle.
    pub fn sample(&self, bus: &mut dyn RegisterBus) -> Result<TelemetrySnapshot> {
        let identity = DeviceIdentity::from_raw(self.read(bus, registers::CHEM_CELLS)?);
        let charger_state = ChargerState::from_raw(self.read(bus, registers::CHARGER_STATE)?);
        let charger_status = ChargerStatus::from_raw(self.read(bus, registers::CHARGE_STATUS)?);
        for decode in [
            identity.chemistry.err(),
            charger_state.err(),
            charger_status.err(),
        ]
        .into_iter()
        .flatten()
        {
            debug!("decode miss: {decode}");
        }

        let charger_config =
            ChargerConfigBits::from_raw(self.read(bus, registers::CHARGER_CONFIG_BITS)?);
        let config_bits = ConfigBits::from_raw(self.read(bus, registers::CONFIG_BITS)?);
        let system_status = SystemStatusBits::from_raw(self.read(bus, registers::SYSTEM_STATUS)?);

        let readings = AnalogReadings {
            charge_current_setting: units::charge_current_setting(
                self.read(bus, registers::CHARGE_CURRENT_SETTING)?,
                self.rsense_ohms,
            ),
            vcharge_setting: units::vcharge_setting(
                self.read(bus, registers::VCHARGE_SETTING)?,
                self.cell_count,
            ),
            die_temperature: units::die_temperature(self.read(bus, registers::DIE_TEMP)?),
            vrecharge: units::vrecharge(
                self.read(bus, registers::LIFEPO4_RECHARGE_THRESHOLD)?,
                self.cell_count,
            ),
            input_voltage: units::input_voltage(self.read(bus, registers::VIN)?),
            input_current: units::input_current(self.read(bus, registers::IIN)?),
            output_voltage: units::output_voltage(self.read(bus, registers::VOUT)?),
            battery_voltage: units::battery_voltage(
                self.read(bus, registers::VBAT)?,
                self.cell_count,
            ),
            battery_current: units::battery_current(self.read(bus, registers::IBAT)?),
        };
        // derived quantities only exist once every dependent reading is in
        let power = DerivedPower::from_readings(&readings);

        Ok(TelemetrySnapshot {
            identity,
            charger_state,
            charger_status,
            charger_config,
            config_bits,
            system_status,
            readings,
            power,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use ltc4162::telemetry::{Chemistry, DecodeError, TelemetrySpeed};
    use std::collections::HashMap;

    /// Bus answering from a fixed register map.
    struct MapBus {
        regs: HashMap<u8, u16>,
    }

    impl MapBus {
        fn new(entries: &[(u8, u16)]) -> Self {
            MapBus {
                regs: entries.iter().copied().collect(),
            }
        }
    }

    impl RegisterBus for MapBus {
        fn read_register(&mut self, addr: u8) -> Result<u16> {
            match self.regs.get(&addr) {
                Some(value) => Ok(*value),
                None => bail!("no device at register 0x{addr:02X}"),
            }
        }
    }

    /// A charging LiFePO4 pack: 4 cells detected, FFS chemistry, CC/CV.
    fn charging_pack() -> MapBus {
        MapBus::new(&[
            (0x43, 0x0504),
            (0x34, 0x0040), // cc_cv_charge
            (0x35, 0x0002), // constant_current
            (0x29, 0x0005),
            (0x14, 0x0008),
            (0x39, 0x0107),
            (0x1A, 31),
            (0x1B, 10),
            (0x3F, 13321),
            (0x2E, 18191),
            (0x3B, 11000), // 18.139 V
            (0x3E, 15000), // 2.199 A
            (0x3C, 10000),
            (0x3A, 18000), // 13.85 V at 4 cells
            (0x3D, 12000), // 1.759 A charging
        ])
    }

    #[test]
    fn test_sample_decodes_full_snapshot() {
        let mut bus = charging_pack();
        let snapshot = ChargerSource::new(0.01, 4).sample(&mut bus).unwrap();

        assert_eq!(snapshot.identity.chemistry, Ok(Chemistry::Ltc4162Ffs));
        assert_eq!(snapshot.identity.detected_cell_count, 4);
        assert_eq!(snapshot.charger_state, Ok(ChargerState::CcCvCharge));
        assert_eq!(snapshot.charger_status, Ok(ChargerStatus::ConstantCurrent));
        assert!(snapshot.charger_config.en_jeita);
        assert!(snapshot.charger_config.en_c_over_x_term);
        assert_eq!(snapshot.config_bits.telemetry_speed, TelemetrySpeed::High);
        assert!(snapshot.system_status.en_chg);

        let r = &snapshot.readings;
        assert!((r.charge_current_setting - 3.2).abs() < 1e-9);
        assert!((r.input_voltage - 11000.0 * 1.649 / 1000.0).abs() < 1e-9);
        assert!((r.battery_current - 12000.0 * 1.466 / 10000.0).abs() < 1e-9);

        // both factors positive, so battery power and friends are present
        let battery_power = snapshot.power.battery_power.unwrap();
        assert!((battery_power - r.battery_voltage * r.battery_current).abs() < 1e-9);
        assert!(snapshot.power.efficiency.is_some());
        assert!(snapshot.power.heat_power.is_some());
    }

    #[test]
    fn test_read_failure_aborts_snapshot() {
        let mut bus = charging_pack();
        bus.regs.remove(&0x3D);

        let err = ChargerSource::new(0.01, 4)
            .sample(&mut bus)
            .unwrap_err();
        // the context names the register that failed
        assert!(format!("{err:#}").contains("IBAT"));
    }

    #[test]
    fn test_decode_miss_stays_field_local() {
        let mut bus = charging_pack();
        bus.regs.insert(0x43, 0x0704); // reserved chemistry code 7
        bus.regs.insert(0x34, 0x0003); // two state bits at once

        let snapshot = ChargerSource::new(0.01, 4).sample(&mut bus).unwrap();
        assert_eq!(
            snapshot.identity.chemistry,
            Err(DecodeError::UnknownChemistry { code: 7 })
        );
        assert_eq!(
            snapshot.charger_state,
            Err(DecodeError::UnknownChargerState { raw: 0x0003 })
        );
        // the rest of the cycle is still valid
        assert_eq!(snapshot.charger_status, Ok(ChargerStatus::ConstantCurrent));
    }

    #[test]
    fn test_discharging_pack_reports_na_power() {
        let mut bus = charging_pack();
        bus.regs.insert(0x3D, 0xF000); // negative battery current

        let snapshot = ChargerSource::new(0.01, 4).sample(&mut bus).unwrap();
        assert!(snapshot.readings.battery_current < 0.0);
        assert_eq!(snapshot.power.battery_power, None);
        assert_eq!(snapshot.power.efficiency, None);
        assert_eq!(snapshot.power.heat_power, None);
    }
}

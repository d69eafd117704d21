//! Fixed-layout charger dashboard
//!
//! Every field lives at a fixed (row, column) with a fixed width so the
//! layout does not jitter between cycles. The value formats are a rendering
//! contract: right-aligned, two or three decimals, `N/A` when a derived
//! quantity does not apply, `unknown(<raw>)` when a register decoded to no
//! known key.

use std::fmt::Display;

use anyhow::Result;

use ltc4162::telemetry::{DecodeError, TelemetrySnapshot};

use crate::core::{CellStyle, DisplaySurface};

const CAPTION: &str = "LTC4162 debug console";

/// Fixed-layout renderer for one telemetry snapshot per cycle.
pub struct Dashboard;

impl Dashboard {
    pub fn new() -> Self {
        Dashboard
    }

    /// Project `snapshot` onto `surface` and issue the cycle's one refresh.
    pub fn render(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut dyn DisplaySurface,
    ) -> Result<()> {
        use CellStyle::{Highlight, Normal};

        surface.clear()?;

        surface.set_cell(0, 0, CAPTION, Highlight)?;
        surface.set_cell(0, 30, "| detected device:", Normal)?;
        surface.set_cell(0, 49, &enum_text(&snapshot.identity.chemistry), Highlight)?;
        surface.set_cell(0, 61, "| battery cells:", Normal)?;
        let cells = snapshot.identity.detected_cell_count.to_string();
        surface.set_cell(0, 78, &cells, Highlight)?;
        surface.set_cell(1, 0, &"\u{2500}".repeat(80), Normal)?;

        surface.set_cell(2, 0, "charger_state:", Normal)?;
        surface.set_cell(2, 15, &enum_text(&snapshot.charger_state), Highlight)?;
        surface.set_cell(2, 40, "charger_status:", Normal)?;
        surface.set_cell(2, 56, &enum_text(&snapshot.charger_status), Highlight)?;

        let r = &snapshot.readings;
        surface.set_cell(3, 0, "charge_current_setting:     A", Normal)?;
        surface.set_cell(3, 24, &format!("{:>4.2}", r.charge_current_setting), Highlight)?;
        surface.set_cell(3, 40, "vcharge_setting:       V", Normal)?;
        surface.set_cell(3, 57, &format!("{:>6.2}", r.vcharge_setting), Highlight)?;
        surface.set_cell(4, 0, "die temperature:       \u{b0}C", Normal)?;
        surface.set_cell(4, 16, &format!("{:>6.2}", r.die_temperature), Highlight)?;
        surface.set_cell(4, 40, "v_recharge_lifepo4:        V", Normal)?;
        surface.set_cell(4, 60, &format!("{:>6.3}", r.vrecharge), Highlight)?;
        surface.set_cell(5, 0, "input voltage  :        V", Normal)?;
        surface.set_cell(5, 17, &format!("{:>6.3}", r.input_voltage), Highlight)?;
        surface.set_cell(6, 0, "input current  :        A", Normal)?;
        surface.set_cell(6, 17, &format!("{:>6.3}", r.input_current), Highlight)?;
        surface.set_cell(7, 0, "output voltage :        V", Normal)?;
        surface.set_cell(7, 17, &format!("{:>6.3}", r.output_voltage), Highlight)?;
        surface.set_cell(8, 0, "battery voltage:        V", Normal)?;
        surface.set_cell(8, 17, &format!("{:>6.3}", r.battery_voltage), Highlight)?;
        surface.set_cell(9, 0, "battery current:        A", Normal)?;
        surface.set_cell(9, 17, &format!("{:>6.3}", r.battery_current), Highlight)?;

        let p = &snapshot.power;
        surface.set_cell(11, 0, "input power    :        W", Normal)?;
        surface.set_cell(11, 17, &format!("{:>6.3}", p.input_power), Highlight)?;
        surface.set_cell(12, 0, "battery power  :        W", Normal)?;
        match p.battery_power {
            Some(watts) => surface.set_cell(12, 17, &format!("{watts:>6.3}"), Highlight)?,
            None => surface.set_cell(12, 20, "N/A", Highlight)?,
        }
        surface.set_cell(13, 0, "efficiency     :        %", Normal)?;
        match p.efficiency {
            Some(percent) => surface.set_cell(13, 17, &format!("{percent:>5.2}"), Highlight)?,
            None => surface.set_cell(13, 20, "N/A", Highlight)?,
        }
        surface.set_cell(14, 0, "heat power     :        W", Normal)?;
        match p.heat_power {
            Some(watts) => surface.set_cell(14, 17, &format!("{watts:>5.2}"), Highlight)?,
            None => surface.set_cell(14, 20, "N/A", Highlight)?,
        }

        let cc = &snapshot.charger_config;
        surface.set_cell(6, 40, "CHARGER_CONFIG_BITS_REG: ", Normal)?;
        surface.set_cell(6, 65, &cc.raw.to_string(), Highlight)?;
        surface.set_cell(7, 40, "en_c_over_x_term   : ", Normal)?;
        surface.set_cell(7, 61, flag(cc.en_c_over_x_term), Highlight)?;
        surface.set_cell(8, 40, "en_jeita           :", Normal)?;
        surface.set_cell(8, 61, flag(cc.en_jeita), Highlight)?;

        let cb = &snapshot.config_bits;
        surface.set_cell(10, 40, "CONFIG_BITS_REG    :", Normal)?;
        surface.set_cell(10, 61, &cb.raw.to_string(), Highlight)?;
        surface.set_cell(11, 40, "suspend_charger    : ", Normal)?;
        surface.set_cell(11, 61, flag(cb.suspend_charger), Highlight)?;
        surface.set_cell(12, 40, "run_bsr            : ", Normal)?;
        surface.set_cell(12, 61, flag(cb.run_bsr), Highlight)?;
        surface.set_cell(13, 40, "telemetry_speed    : ", Normal)?;
        surface.set_cell(13, 61, cb.telemetry_speed.as_str(), Highlight)?;
        surface.set_cell(14, 40, "force_telemetry_on : ", Normal)?;
        surface.set_cell(14, 61, flag(cb.force_telemetry_on), Highlight)?;
        surface.set_cell(15, 40, "mppt_en            : ", Normal)?;
        surface.set_cell(15, 61, flag(cb.mppt_en), Highlight)?;

        let ss = &snapshot.system_status;
        surface.set_cell(17, 40, "SYSTEM_STATUS_REG  :", Normal)?;
        surface.set_cell(17, 61, &ss.raw.to_string(), Highlight)?;
        surface.set_cell(18, 40, "en_chg             : ", Normal)?;
        surface.set_cell(18, 61, flag(ss.en_chg), Highlight)?;
        surface.set_cell(19, 40, "cell_count_err     : ", Normal)?;
        surface.set_cell(19, 61, flag(ss.cell_count_err), Highlight)?;
        surface.set_cell(20, 40, "no_rt              : ", Normal)?;
        surface.set_cell(20, 61, flag(ss.no_rt), Highlight)?;
        surface.set_cell(21, 40, "thermal_shutdown   : ", Normal)?;
        surface.set_cell(21, 61, flag(ss.thermal_shutdown), Highlight)?;
        surface.set_cell(22, 40, "vin_ovlo           : ", Normal)?;
        surface.set_cell(22, 61, flag(ss.vin_ovlo), Highlight)?;
        surface.set_cell(23, 40, "vin_gt_vbat        : ", Normal)?;
        surface.set_cell(23, 61, flag(ss.vin_gt_vbat), Highlight)?;
        surface.set_cell(24, 40, "vin_gt_4p2v        : ", Normal)?;
        surface.set_cell(24, 61, flag(ss.vin_gt_4p2v), Highlight)?;
        surface.set_cell(25, 40, "intvcc_gt_2p8v     : ", Normal)?;
        surface.set_cell(25, 61, flag(ss.intvcc_gt_2p8v), Highlight)?;

        surface.refresh()
    }

    /// Render the cycle-wide banner for an aborted snapshot.
    pub fn render_error(
        &self,
        error: &anyhow::Error,
        surface: &mut dyn DisplaySurface,
    ) -> Result<()> {
        surface.clear()?;
        surface.set_cell(0, 0, CAPTION, CellStyle::Highlight)?;
        surface.set_cell(1, 0, &"\u{2500}".repeat(80), CellStyle::Normal)?;
        surface.set_cell(
            2,
            0,
            &format!("telemetry unavailable: {error:#}"),
            CellStyle::Alert,
        )?;
        surface.set_cell(3, 0, "retrying at the next poll cycle", CellStyle::Normal)?;
        surface.refresh()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard::new()
    }
}

fn enum_text<T: Display>(field: &Result<T, DecodeError>) -> String {
    match field {
        Ok(value) => value.to_string(),
        Err(e) => format!("unknown({})", e.raw()),
    }
}

fn flag(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use ltc4162::telemetry::{
        AnalogReadings, ChargerConfigBits, ChargerState, ChargerStatus, Chemistry, ConfigBits,
        DerivedPower, DeviceIdentity, SystemStatusBits,
    };

    #[derive(Default)]
    struct RecordingSurface {
        cells: Vec<(u16, u16, String, CellStyle)>,
        clears: u32,
        refreshes: u32,
    }

    impl RecordingSurface {
        fn text_at(&self, row: u16, col: u16) -> Option<&str> {
            self.cells
                .iter()
                .rev()
                .find(|(r, c, _, _)| (*r, *c) == (row, col))
                .map(|(_, _, text, _)| text.as_str())
        }
    }

    impl DisplaySurface for RecordingSurface {
        fn set_cell(&mut self, row: u16, col: u16, text: &str, style: CellStyle) -> Result<()> {
            self.cells.push((row, col, text.to_string(), style));
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn refresh(&mut self) -> Result<()> {
            self.refreshes += 1;
            Ok(())
        }
    }

    fn snapshot() -> TelemetrySnapshot {
        let readings = AnalogReadings {
            charge_current_setting: 3.2,
            vcharge_setting: 14.15,
            die_temperature: 22.0,
            vrecharge: 14.0,
            input_voltage: 18.139,
            input_current: 2.199,
            output_voltage: 16.53,
            battery_voltage: 13.8528,
            battery_current: 1.7592,
        };
        TelemetrySnapshot {
            identity: DeviceIdentity {
                chemistry: Ok(Chemistry::Ltc4162Ffs),
                detected_cell_count: 4,
            },
            charger_state: Ok(ChargerState::CcCvCharge),
            charger_status: Ok(ChargerStatus::ConstantCurrent),
            charger_config: ChargerConfigBits::from_raw(0x0005),
            config_bits: ConfigBits::from_raw(0x0008),
            system_status: SystemStatusBits::from_raw(0x0107),
            readings,
            power: DerivedPower::from_readings(&readings),
        }
    }

    #[test]
    fn test_fields_land_on_fixed_cells() {
        let mut surface = RecordingSurface::default();
        Dashboard::new().render(&snapshot(), &mut surface).unwrap();

        assert_eq!(surface.text_at(0, 49), Some("LTC4162_FFS"));
        assert_eq!(surface.text_at(2, 15), Some("cc_cv_charge"));
        assert_eq!(surface.text_at(2, 56), Some("constant_current"));
        assert_eq!(surface.text_at(9, 17), Some(" 1.759"));
        assert_eq!(surface.text_at(13, 61), Some("tel_high_speed"));
        assert_eq!(surface.text_at(18, 61), Some("1"));
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.refreshes, 1);
    }

    #[test]
    fn test_numeric_fields_are_fixed_width() {
        let mut surface = RecordingSurface::default();
        Dashboard::new().render(&snapshot(), &mut surface).unwrap();

        // every analog cell in the left column is exactly six characters
        for (row, col) in [(4, 16), (5, 17), (6, 17), (7, 17), (8, 17), (9, 17), (11, 17)] {
            let text = surface.text_at(row, col).unwrap();
            assert_eq!(text.len(), 6, "({row},{col}) rendered {text:?}");
        }
    }

    #[test]
    fn test_not_applicable_power_renders_na() {
        let mut snapshot = snapshot();
        snapshot.readings.battery_current = -0.5;
        snapshot.power = DerivedPower::from_readings(&snapshot.readings);

        let mut surface = RecordingSurface::default();
        Dashboard::new().render(&snapshot, &mut surface).unwrap();

        assert_eq!(surface.text_at(12, 20), Some("N/A"));
        assert_eq!(surface.text_at(13, 20), Some("N/A"));
        assert_eq!(surface.text_at(14, 20), Some("N/A"));
        assert_eq!(surface.text_at(12, 17), None);
    }

    #[test]
    fn test_decode_miss_renders_unknown_raw() {
        let mut snapshot = snapshot();
        snapshot.identity.chemistry = Chemistry::from_code(7);
        snapshot.charger_state = ChargerState::from_raw(0x0003);

        let mut surface = RecordingSurface::default();
        Dashboard::new().render(&snapshot, &mut surface).unwrap();

        assert_eq!(surface.text_at(0, 49), Some("unknown(7)"));
        assert_eq!(surface.text_at(2, 15), Some("unknown(3)"));
    }

    #[test]
    fn test_error_banner_cycle() {
        let mut surface = RecordingSurface::default();
        Dashboard::new()
            .render_error(&anyhow!("bus timeout"), &mut surface)
            .unwrap();

        assert_eq!(surface.refreshes, 1);
        let banner = surface.text_at(2, 0).unwrap();
        assert!(banner.contains("bus timeout"));
        assert!(surface
            .cells
            .iter()
            .any(|(_, _, _, style)| *style == CellStyle::Alert));
    }
}

//! Register catalog for the LTC4162.
//!
//! Every register the dashboard polls is listed here, once. Porting to a
//! different chip revision means editing only this table.

/// A fixed-address 16-bit register exposed by the chip over the bus.
///
/// The dashboard's usage is read-only; `name` is the datasheet register name
/// used in error context and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub addr: u8,
    pub name: &'static str,
}

/// Charger configuration bits (suspend, BSR, telemetry mode, MPPT).
pub const CONFIG_BITS: Register = Register { addr: 0x14, name: "CONFIG_BITS_REG" };
/// Charge current servo setting, in sense-resistor LSBs.
pub const CHARGE_CURRENT_SETTING: Register = Register { addr: 0x1A, name: "CHARGE_CURRENT_SETTING" };
/// Charge voltage servo setting, in per-cell LSBs.
pub const VCHARGE_SETTING: Register = Register { addr: 0x1B, name: "VCHARGE_SETTING" };
/// Charger feature enables (C/x termination, JEITA).
pub const CHARGER_CONFIG_BITS: Register = Register { addr: 0x29, name: "CHARGER_CONFIG_BITS_REG" };
/// Recharge threshold for LiFePO4 chemistries.
pub const LIFEPO4_RECHARGE_THRESHOLD: Register = Register { addr: 0x2E, name: "LIFEPO4_RECHARGE_THRESHOLD" };
/// Charging state machine position, one active bit.
pub const CHARGER_STATE: Register = Register { addr: 0x34, name: "CHARGER_STATE" };
/// Active regulation mode, one active bit (all zero while off).
pub const CHARGE_STATUS: Register = Register { addr: 0x35, name: "CHARGE_STATUS" };
/// System-level status flags (charger enable, RT pin, VIN comparators).
pub const SYSTEM_STATUS: Register = Register { addr: 0x39, name: "SYSTEM_STATUS_REG" };
/// Battery voltage telemetry, per-cell LSBs.
pub const VBAT: Register = Register { addr: 0x3A, name: "VBAT" };
/// Input voltage telemetry.
pub const VIN: Register = Register { addr: 0x3B, name: "VIN" };
/// System output voltage telemetry.
pub const VOUT: Register = Register { addr: 0x3C, name: "VOUT" };
/// Battery current telemetry, signed two's complement.
pub const IBAT: Register = Register { addr: 0x3D, name: "IBAT" };
/// Input current telemetry.
pub const IIN: Register = Register { addr: 0x3E, name: "IIN" };
/// Die temperature telemetry.
pub const DIE_TEMP: Register = Register { addr: 0x3F, name: "DIE_TEMP" };
/// Chemistry code and detected cell count.
pub const CHEM_CELLS: Register = Register { addr: 0x43, name: "CHEM_CELLS_REG" };

/// Every register read during one poll cycle.
pub const ALL: [Register; 15] = [
    CONFIG_BITS,
    CHARGE_CURRENT_SETTING,
    VCHARGE_SETTING,
    CHARGER_CONFIG_BITS,
    LIFEPO4_RECHARGE_THRESHOLD,
    CHARGER_STATE,
    CHARGE_STATUS,
    SYSTEM_STATUS,
    VBAT,
    VIN,
    VOUT,
    IBAT,
    IIN,
    DIE_TEMP,
    CHEM_CELLS,
];

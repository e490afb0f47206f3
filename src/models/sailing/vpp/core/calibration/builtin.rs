//! Built-in calibration set.
//!
//! Sail polars follow the classic Hazen shapes. The hull residuary surface is
//! tabulated per tonne of displacement over Froude number, beam/draft and
//! length/volume ratio; a zero-speed row is included so the surface starts at
//! rest.

use crate::support::interp::{InterpError, LinearCurve, TrilinearCube};

use super::{CalibrationError, CalibrationRegistry, SailPolar, names};

const RIGHTING_ARM_HEEL: [f64; 13] = [
    0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 60.0, 75.0, 90.0,
];
const RIGHTING_ARM: [f64; 13] = [
    0.0, 0.13, 0.27, 0.41, 0.54, 0.66, 0.76, 0.84, 0.90, 0.93, 0.90, 0.75, 0.55,
];

const APPENDAGE_FN: [f64; 7] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
const KEEL_RESIDUARY: [f64; 7] = [0.0, 0.1, 0.5, 1.5, 3.5, 6.0, 8.0];
const BULB_RESIDUARY: [f64; 7] = [0.0, 0.05, 0.3, 1.0, 2.4, 4.2, 5.6];

const FLAT: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
const FLAT_DRAG: [f64; 6] = [0.60, 0.68, 0.76, 0.84, 0.92, 1.0];

const HEIGHT_AWA: [f64; 4] = [0.0, 30.0, 60.0, 90.0];
const EFFECTIVE_HEIGHT: [f64; 4] = [1.0, 1.0, 0.95, 0.85];

const MAIN_KP: f64 = 0.016;
const MAIN_AWA: [f64; 10] = [0.0, 7.0, 9.0, 12.0, 28.0, 60.0, 90.0, 120.0, 150.0, 180.0];
const MAIN_CL: [f64; 10] = [0.0, 0.86, 1.05, 1.17, 1.38, 1.45, 1.45, 1.06, 0.95, 0.80];
const MAIN_CD: [f64; 10] = [
    0.043, 0.026, 0.023, 0.023, 0.032, 0.113, 0.382, 0.96, 1.24, 1.27,
];

const JIB_KP: f64 = 0.016;
const JIB_AWA: [f64; 10] = [0.0, 7.0, 15.0, 20.0, 27.0, 50.0, 60.0, 100.0, 150.0, 180.0];
const JIB_CL: [f64; 10] = [0.0, 0.0, 1.0, 1.375, 1.45, 1.45, 1.25, 0.4, 0.0, -0.1];
const JIB_CD: [f64; 10] = [0.05, 0.05, 0.032, 0.031, 0.037, 0.25, 0.35, 0.73, 0.95, 0.9];

const KITE_KP: f64 = 0.019;
const KITE_AWA: [f64; 13] = [
    0.0, 28.0, 41.0, 50.0, 60.0, 67.0, 75.0, 100.0, 115.0, 130.0, 150.0, 170.0, 180.0,
];
const KITE_CL: [f64; 13] = [
    0.0, 0.0, 0.023, 0.5, 0.94, 1.0, 1.0, 0.85, 0.8, 0.75, 0.55, 0.4, 0.35,
];
const KITE_CD: [f64; 13] = [
    0.19, 0.19, 0.32, 0.31, 0.37, 0.42, 0.47, 0.63, 0.8, 0.9, 1.0, 1.1, 1.1,
];

const RESIDUARY_FN: [f64; 14] = [
    0.0, 0.125, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7,
];
const RESIDUARY_BTR: [f64; 2] = [3.0, 9.0];
const RESIDUARY_LVR: [f64; 2] = [2.5, 9.0];

/// Residuary resistance at beam/draft 3, identical across length/volume.
const RESIDUARY_NARROW: [f64; 14] = [
    0.0, 0.0487, 0.20, 0.80, 2.1, 5.0, 11.0, 24.0, 48.0, 85.0, 140.0, 210.0, 280.0, 357.062,
];

/// Residuary resistance at beam/draft 9 and length/volume 2.5.
const RESIDUARY_BEAMY_SHORT: [f64; 14] = [
    0.0, 0.0393, 0.12, 0.45, 1.0, 2.0, 3.6, 7.0, 14.0, 22.0, 28.0, 32.5, 35.8, 38.0526,
];

/// Residuary resistance at beam/draft 9 and length/volume 9.
const RESIDUARY_BEAMY_LONG: [f64; 14] = [
    0.0, 0.0613, 0.16, 0.55, 1.2, 2.4, 4.3, 8.2, 16.0, 25.0, 31.5, 36.0, 39.5, 42.2353,
];

pub(super) fn registry() -> Result<CalibrationRegistry, CalibrationError> {
    let mut registry = CalibrationRegistry::new();

    registry.insert(
        names::RIGHTING_ARM,
        curve(names::RIGHTING_ARM, &RIGHTING_ARM_HEEL, &RIGHTING_ARM)?,
    );
    registry.insert(
        names::KEEL_RESIDUARY,
        curve(names::KEEL_RESIDUARY, &APPENDAGE_FN, &KEEL_RESIDUARY)?,
    );
    registry.insert(
        names::BULB_RESIDUARY,
        curve(names::BULB_RESIDUARY, &APPENDAGE_FN, &BULB_RESIDUARY)?,
    );
    registry.insert(names::FLAT_DRAG, curve(names::FLAT_DRAG, &FLAT, &FLAT_DRAG)?);
    registry.insert(
        names::EFFECTIVE_HEIGHT,
        curve(names::EFFECTIVE_HEIGHT, &HEIGHT_AWA, &EFFECTIVE_HEIGHT)?,
    );

    registry.insert(
        names::MAIN_POLAR,
        polar(names::MAIN_POLAR, MAIN_KP, &MAIN_AWA, &MAIN_CL, &MAIN_CD)?,
    );
    registry.insert(
        names::JIB_POLAR,
        polar(names::JIB_POLAR, JIB_KP, &JIB_AWA, &JIB_CL, &JIB_CD)?,
    );
    registry.insert(
        names::KITE_POLAR,
        polar(names::KITE_POLAR, KITE_KP, &KITE_AWA, &KITE_CL, &KITE_CD)?,
    );

    registry.insert(names::HULL_RESIDUARY, residuary_cube()?);

    Ok(registry)
}

fn residuary_cube() -> Result<TrilinearCube, CalibrationError> {
    // Row-major over (Fn, btr, lvr).
    let mut values = Vec::with_capacity(RESIDUARY_FN.len() * 4);
    for i in 0..RESIDUARY_FN.len() {
        values.extend([
            RESIDUARY_NARROW[i],
            RESIDUARY_NARROW[i],
            RESIDUARY_BEAMY_SHORT[i],
            RESIDUARY_BEAMY_LONG[i],
        ]);
    }

    TrilinearCube::new(
        [
            RESIDUARY_FN.to_vec(),
            RESIDUARY_BTR.to_vec(),
            RESIDUARY_LVR.to_vec(),
        ],
        values,
    )
    .map_err(table_error(names::HULL_RESIDUARY))
}

fn curve(name: &str, x: &[f64], y: &[f64]) -> Result<LinearCurve, CalibrationError> {
    LinearCurve::new(x.to_vec(), y.to_vec()).map_err(table_error(name))
}

fn polar(
    name: &str,
    kp: f64,
    awa: &[f64],
    cl: &[f64],
    cd: &[f64],
) -> Result<SailPolar, CalibrationError> {
    Ok(SailPolar::new(
        kp,
        curve(name, awa, cl)?,
        curve(name, awa, cd)?,
    ))
}

fn table_error(name: &str) -> impl FnOnce(InterpError) -> CalibrationError + '_ {
    move |source| CalibrationError::Table {
        name: name.to_owned(),
        source,
    }
}

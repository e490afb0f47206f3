//! Shared fixtures: the YD-41 cruiser-racer.

use uom::si::{
    area::square_meter,
    f64::{Area, Length, Mass, Volume},
    length::meter,
    mass::kilogram,
    volume::cubic_meter,
};

use super::{
    calibration::CalibrationRegistry,
    yacht::{AppendageParticulars, HullParticulars, SailParticulars, Yacht, YachtParticulars},
};

fn m(value: f64) -> Length {
    Length::new::<meter>(value)
}

fn m2(value: f64) -> Area {
    Area::new::<square_meter>(value)
}

pub(crate) fn main() -> SailParticulars {
    SailParticulars::Main {
        name: "MN1".into(),
        p: m(16.60),
        e: m(5.60),
        roach: 0.1,
        bad: m(1.0),
        polar: None,
    }
}

pub(crate) fn jib() -> SailParticulars {
    SailParticulars::Jib {
        name: "J1".into(),
        i: m(16.20),
        j: m(5.10),
        lpg: m(5.40),
        hbi: m(1.8),
        polar: None,
    }
}

pub(crate) fn kite() -> SailParticulars {
    SailParticulars::Kite {
        name: "A2".into(),
        area: m2(150.0),
        vce: m(9.55),
        polar: None,
    }
}

/// YD-41 with a main, a jib and an A2 gennaker.
pub(crate) fn yd41_particulars() -> YachtParticulars {
    YachtParticulars {
        name: "YD41".into(),
        hull: HullParticulars {
            lwl: m(11.90),
            vol: Volume::new::<cubic_meter>(6.05),
            bwl: m(3.18),
            tc: m(0.4),
            wsa: m2(28.20),
            tmax: m(2.30),
            amax: m2(1.051),
            mass: Mass::new::<kilogram>(6500.0),
            loa: m(12.5),
            boa: m(4.2),
            ff: m(1.5),
            fa: m(1.5),
        },
        appendages: vec![
            AppendageParticulars::Keel {
                root_chord: m(1.00),
                tip_chord: m(0.78),
                span: m(1.90),
            },
            AppendageParticulars::Rudder {
                root_chord: m(0.48),
                tip_chord: m(0.22),
                span: m(1.15),
            },
        ],
        sails: vec![main(), jib(), kite()],
    }
}

/// YD-41 with the given sails.
pub(crate) fn yd41_with(sails: Vec<SailParticulars>) -> Yacht {
    let mut particulars = yd41_particulars();
    particulars.sails = sails;
    Yacht::new(&particulars).expect("fixture yacht should build")
}

/// YD-41 with its full inventory.
pub(crate) fn yd41() -> Yacht {
    Yacht::new(&yd41_particulars()).expect("fixture yacht should build")
}

pub(crate) fn registry() -> CalibrationRegistry {
    CalibrationRegistry::builtin().expect("built-in calibration should load")
}

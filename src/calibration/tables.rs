//! Color-temperature calibration coefficients
//!
//! References:
//!  - Alonso, Arribas & Martinez-Roger 1996, A&A 313, 873 (dwarfs)
//!  - Alonso, Arribas & Martinez-Roger 1999, A&AS 140, 261 (giants)
//!  - Ramirez & Melendez 2005, ApJ 626, 465 (dwarfs and giants, 2MASS)
//!  - Casagrande et al. 2010, A&A 512, A54 (dwarfs)

use super::{Bin, Calibration, Interval, Paper, Relation, Scheme};
use crate::photometry::{ColorIndex, ColorMode, LuminosityClass};

const ANY: Interval = Interval::ANY;
const fn closed(min: f64, max: f64) -> Interval {
    Interval::closed(min, max)
}

/// Ramirez & Melendez (2005) metallicity bins, in evaluation order
const FEH_BIN_1: Interval = closed(-0.5, 0.5);
const FEH_BIN_2: Interval = closed(-1.5, -0.5);
const FEH_BIN_3: Interval = closed(-2.5, -1.5);
const FEH_BIN_4: Interval = closed(-4.0, -2.5);
const BIN_LABELS: [&str; 4] = [
    "[Fe/H] -0.5..+0.5",
    "[Fe/H] -1.5..-0.5",
    "[Fe/H] -2.5..-1.5",
    "[Fe/H] -4.0..-2.5",
];

const fn ramirez_bins(color: [Interval; 4], correction: [[f64; 7]; 4]) -> [Bin; 4] {
    let feh = [FEH_BIN_1, FEH_BIN_2, FEH_BIN_3, FEH_BIN_4];
    [
        Bin {
            label: BIN_LABELS[0],
            color: color[0],
            feh: feh[0],
            correction: correction[0],
        },
        Bin {
            label: BIN_LABELS[1],
            color: color[1],
            feh: feh[1],
            correction: correction[1],
        },
        Bin {
            label: BIN_LABELS[2],
            color: color[2],
            feh: feh[2],
            correction: correction[2],
        },
        Bin {
            label: BIN_LABELS[3],
            color: color[3],
            feh: feh[3],
            correction: correction[3],
        },
    ]
}

// ---------------------------------------------------------------- GIANTS

const ALONSO99_GIANT_VK_RELATIONS: [Relation; 2] = [
    Relation {
        label: "eq.8",
        color: closed(0.20, 2.50),
        feh: ANY,
        theta: [0.5558, 0.2105, 1.981e-3, -9.965e-3, 1.325e-2, -2.726e-3],
    },
    Relation {
        label: "eq.9",
        color: ANY,
        feh: ANY,
        theta: [0.3770, 0.3660, -3.170e-2, -3.074e-3, -2.765e-3, -2.973e-3],
    },
];
pub const ALONSO99_GIANT_VK: Calibration = Calibration {
    paper: Paper::Alonso1999,
    color: ColorIndex::VKTcs,
    scheme: Scheme::Piecewise(&ALONSO99_GIANT_VK_RELATIONS),
};

const ALONSO99_GIANT_BV_RELATIONS: [Relation; 2] = [
    Relation {
        label: "eq.3",
        color: closed(0.20, 0.80),
        feh: ANY,
        theta: [0.5716, 0.5404, -6.126e-2, -4.862e-2, -1.777e-2, -7.969e-3],
    },
    Relation {
        label: "eq.4",
        color: ANY,
        feh: ANY,
        theta: [0.6177, 0.4354, -4.025e-3, 5.204e-2, -0.1127, -1.385e-2],
    },
];
pub const ALONSO99_GIANT_BV: Calibration = Calibration {
    paper: Paper::Alonso1999,
    color: ColorIndex::BV,
    scheme: Scheme::Piecewise(&ALONSO99_GIANT_BV_RELATIONS),
};

const RAMIREZ_GIANT_VKS_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(1.244, 3.286),
        closed(1.366, 4.474),
        closed(1.334, 3.549),
        closed(1.258, 2.768),
    ],
    [
        [-72.6664, 36.5361, 0.0, 0.0, 0.0, 0.0, 0.0],
        [86.0358, -65.4928, 10.8901, 0.0, 0.0, 0.0, 0.0],
        [-6.96153, 14.3298, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-943.925, 1497.64, -795.867, 138.965, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_GIANT_VKS: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::VKs,
    scheme: Scheme::Corrected {
        theta: [0.4405, 0.3272, -0.0252, -0.0016, -0.0053, -0.0040],
        bins: &RAMIREZ_GIANT_VKS_BINS,
    },
};

const RAMIREZ_GIANT_VJ_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(1.259, 2.400),
        closed(1.030, 3.418),
        closed(1.033, 2.679),
        closed(0.977, 2.048),
    ],
    [
        [-122.595, 76.4847, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-10.3848, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [4.18695, 13.8937, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-67.7716, 28.9202, 0.0, 0.0, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_GIANT_VJ: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::VJ,
    scheme: Scheme::Corrected {
        theta: [0.2943, 0.5604, -0.0677, 0.0179, -0.0532, -0.0088],
        bins: &RAMIREZ_GIANT_VJ_BINS,
    },
};

const RAMIREZ_GIANT_VH_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(1.194, 3.059),
        closed(1.293, 4.263),
        closed(1.273, 3.416),
        closed(1.232, 2.625),
    ],
    [
        [-377.022, 334.733, -69.8093, 0.0, 0.0, 0.0, 0.0],
        [71.7949, -55.5383, 9.61821, 0.0, 0.0, 0.0, 0.0],
        [-27.4190, 20.7082, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-46.2946, 20.1061, 0.0, 0.0, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_GIANT_VH: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::VH,
    scheme: Scheme::Corrected {
        theta: [0.4354, 0.3405, -0.0263, -0.0012, -0.0049, -0.0027],
        bins: &RAMIREZ_GIANT_VH_BINS,
    },
};

// each metallicity bin applies its own correction row
const RAMIREZ_GIANT_BV_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(0.144, 1.668),
        closed(0.664, 1.558),
        closed(0.605, 1.352),
        closed(0.680, 1.110),
    ],
    [
        [112.116, -372.622, 67.1254, 395.333, -203.471, 0.0, 0.0],
        [-12.9762, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [606.032, -1248.79, 627.453, 0.0, 0.0, 0.0, 0.0],
        [-9.26209, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_GIANT_BV: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::BV,
    scheme: Scheme::Corrected {
        theta: [0.5737, 0.4882, -0.0149, 0.0563, -0.1160, -0.0114],
        bins: &RAMIREZ_GIANT_BV_BINS,
    },
};

// ---------------------------------------------------------------- DWARFS

const ALONSO96_DWARF_VK_RELATIONS: [Relation; 2] = [
    Relation {
        label: "eq.7",
        color: closed(0.40, 1.60),
        feh: ANY,
        theta: [0.555, 0.195, 0.013, -0.008, 0.009, -0.002],
    },
    Relation {
        label: "eq.8",
        color: Interval::left_open(1.60, 2.20),
        feh: ANY,
        theta: [0.566, 0.217, -0.003, -0.024, 0.037, -0.002],
    },
];
pub const ALONSO96_DWARF_VK: Calibration = Calibration {
    paper: Paper::Alonso1996,
    color: ColorIndex::VKTcs,
    scheme: Scheme::Piecewise(&ALONSO96_DWARF_VK_RELATIONS),
};

const ALONSO96_DWARF_BV_RELATIONS: [Relation; 1] = [Relation {
    label: "eq.1",
    color: closed(0.20, 0.80),
    feh: ANY,
    theta: [0.541, 0.533, 0.007, -0.019, -0.047, -0.011],
}];
pub const ALONSO96_DWARF_BV: Calibration = Calibration {
    paper: Paper::Alonso1996,
    color: ColorIndex::BV,
    scheme: Scheme::Piecewise(&ALONSO96_DWARF_BV_RELATIONS),
};

const RAMIREZ_DWARF_VKS_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(0.896, 3.360),
        closed(1.060, 2.665),
        closed(1.101, 2.670),
        closed(1.126, 2.596),
    ],
    [
        [-1425.36, 3218.36, -2566.54, 859.644, -102.554, 0.0, 0.0],
        [2.35133, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-1849.46, 4577.00, -4284.02, 1700.38, -268.589, 0.0, 0.0],
        [215.721, -796.519, 714.423, -175.678, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_DWARF_VKS: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::VKs,
    scheme: Scheme::Corrected {
        theta: [0.4942, 0.2809, -0.0180, -0.0294, 0.0444, -0.0008],
        bins: &RAMIREZ_DWARF_VKS_BINS,
    },
};

const RAMIREZ_DWARF_VJ_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(0.815, 2.608),
        closed(0.860, 2.087),
        closed(0.927, 1.983),
        closed(0.891, 1.932),
    ],
    [
        [422.406, -910.603, 621.335, -132.566, 0.0, 0.0, 0.0],
        [-466.616, 658.349, -220.454, 0.0, 0.0, 0.0, 0.0],
        [-862.072, 1236.84, -423.729, 0.0, 0.0, 0.0, 0.0],
        [-1046.10, 1652.06, -597.340, 0.0, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_DWARF_VJ: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::VJ,
    scheme: Scheme::Corrected {
        theta: [0.4050, 0.4792, -0.0617, -0.0392, 0.0401, -0.0023],
        bins: &RAMIREZ_DWARF_VJ_BINS,
    },
};

const RAMIREZ_DWARF_VH_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(0.839, 3.215),
        closed(1.032, 2.532),
        closed(1.070, 2.535),
        closed(1.093, 2.388),
    ],
    [
        [-53.5574, 36.0990, 15.6878, -8.84468, 0.0, 0.0, 0.0],
        [1.60629, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [506.559, -1277.52, 939.519, -208.621, 0.0, 0.0, 0.0],
        [-471.588, 643.972, -199.639, 0.0, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_DWARF_VH: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::VH,
    scheme: Scheme::Corrected {
        theta: [0.4931, 0.3056, -0.0241, -0.0396, 0.0678, 0.0020],
        bins: &RAMIREZ_DWARF_VH_BINS,
    },
};

// each metallicity bin applies its own correction row
const RAMIREZ_DWARF_BV_BINS: [Bin; 4] = ramirez_bins(
    [
        closed(0.310, 1.507),
        closed(0.307, 1.202),
        closed(0.335, 1.030),
        closed(0.343, 0.976),
    ],
    [
        [-261.548, 684.977, -470.049, 79.8977, 0.0, 0.0, 0.0],
        [-324.033, 1516.44, -2107.37, 852.150, 0.0, 0.0, 0.0],
        [30.5985, -46.7882, 0.0, 0.0, 0.0, 0.0, 0.0],
        [139.965, -292.329, 0.0, 0.0, 0.0, 0.0, 0.0],
    ],
);
pub const RAMIREZ_DWARF_BV: Calibration = Calibration {
    paper: Paper::Ramirez2005,
    color: ColorIndex::BV,
    scheme: Scheme::Corrected {
        theta: [0.5002, 0.6440, -0.0690, -0.0230, -0.0566, -0.0170],
        bins: &RAMIREZ_DWARF_BV_BINS,
    },
};

const CASAGRANDE_FEH: Interval = closed(-5.0, 0.40);
const CASAGRANDE_DWARF_VKS_RELATIONS: [Relation; 1] = [Relation {
    label: "V-Ks",
    color: closed(0.78, 3.15),
    feh: CASAGRANDE_FEH,
    theta: [0.5057, 0.2600, -0.0146, -0.0131, 0.0288, 0.0016],
}];
pub const CASAGRANDE_DWARF_VKS: Calibration = Calibration {
    paper: Paper::Casagrande2010,
    color: ColorIndex::VKs,
    scheme: Scheme::Piecewise(&CASAGRANDE_DWARF_VKS_RELATIONS),
};

const CASAGRANDE_DWARF_BV_RELATIONS: [Relation; 1] = [Relation {
    label: "B-V",
    color: closed(0.18, 1.29),
    feh: CASAGRANDE_FEH,
    theta: [0.5665, 0.4809, -0.0060, -0.0613, -0.0042, -0.0055],
}];
pub const CASAGRANDE_DWARF_BV: Calibration = Calibration {
    paper: Paper::Casagrande2010,
    color: ColorIndex::BV,
    scheme: Scheme::Piecewise(&CASAGRANDE_DWARF_BV_RELATIONS),
};

const GIANT_VKS: [Calibration; 2] = [ALONSO99_GIANT_VK, RAMIREZ_GIANT_VKS];
const GIANT_VJH: [Calibration; 2] = [RAMIREZ_GIANT_VJ, RAMIREZ_GIANT_VH];
const GIANT_BV: [Calibration; 2] = [ALONSO99_GIANT_BV, RAMIREZ_GIANT_BV];
const DWARF_VKS: [Calibration; 3] = [ALONSO96_DWARF_VK, RAMIREZ_DWARF_VKS, CASAGRANDE_DWARF_VKS];
const DWARF_VJH: [Calibration; 2] = [RAMIREZ_DWARF_VJ, RAMIREZ_DWARF_VH];
const DWARF_BV: [Calibration; 3] = [ALONSO96_DWARF_BV, RAMIREZ_DWARF_BV, CASAGRANDE_DWARF_BV];

/// The ordered calibrations evaluated for a luminosity class and a color mode
pub fn calibrations(class: LuminosityClass, mode: ColorMode) -> &'static [Calibration] {
    use ColorMode::*;
    use LuminosityClass::*;
    match (class, mode) {
        (Giant, VKs) => &GIANT_VKS,
        (Giant, VJH) => &GIANT_VJH,
        (Giant, BV) => &GIANT_BV,
        (Dwarf, VKs) => &DWARF_VKS,
        (Dwarf, VJH) => &DWARF_VJH,
        (Dwarf, BV) => &DWARF_BV,
    }
}

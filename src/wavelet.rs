//! Multilevel discrete wavelet transform with half-sample symmetric boundaries.
//!
//! Bands are ordered `[approximation, detail_L, ..., detail_1]`: index 0 is the
//! coarsest approximation and the last index holds the finest details.

use crate::error::{Result, TrajectoidError};
use std::fmt;
use std::str::FromStr;

const DB2: [f64; 4] = [
    -0.12940952255092145,
    0.22414386804185735,
    0.836516303737469,
    0.48296291314469025,
];

const DB3: [f64; 6] = [
    0.035226291882100656,
    -0.08544127388224149,
    -0.13501102001039084,
    0.4598775021193313,
    0.8068915093133388,
    0.3326705529509569,
];

const DB4: [f64; 8] = [
    -0.010597401784997278,
    0.032883011666982945,
    0.030841381835986965,
    -0.18703481171888114,
    -0.02798376941698385,
    0.6308807679295904,
    0.7148465705525415,
    0.23037781330885523,
];

const DB8: [f64; 16] = [
    -0.00011747678400228192,
    0.0006754494059985568,
    -0.0003917403729959771,
    -0.00487035299301066,
    0.008746094047015655,
    0.013981027917015516,
    -0.04408825393106472,
    -0.01736930100202211,
    0.128747426620186,
    0.00047248457399797254,
    -0.2840155429624281,
    -0.015829105256023893,
    0.5853546836548691,
    0.6756307362980128,
    0.3128715909144659,
    0.05441584224308161,
];

const SYM4: [f64; 8] = [
    -0.07576571478927333,
    -0.02963552764599851,
    0.49761866763201545,
    0.8037387518059161,
    0.29785779560527736,
    -0.09921954357684722,
    -0.012603967262037833,
    0.0322231006040427,
];

/// A supported orthogonal wavelet kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wavelet {
    Haar,
    Db2,
    Db3,
    Db4,
    Db8,
    Sym4,
}

impl Wavelet {
    pub fn name(&self) -> &'static str {
        match self {
            Wavelet::Haar => "haar",
            Wavelet::Db2 => "db2",
            Wavelet::Db3 => "db3",
            Wavelet::Db4 => "db4",
            Wavelet::Db8 => "db8",
            Wavelet::Sym4 => "sym4",
        }
    }

    /// Decomposition low-pass filter.
    pub fn dec_lo(&self) -> Vec<f64> {
        match self {
            Wavelet::Haar => vec![std::f64::consts::FRAC_1_SQRT_2; 2],
            Wavelet::Db2 => DB2.to_vec(),
            Wavelet::Db3 => DB3.to_vec(),
            Wavelet::Db4 => DB4.to_vec(),
            Wavelet::Db8 => DB8.to_vec(),
            Wavelet::Sym4 => SYM4.to_vec(),
        }
    }

    pub fn filter_len(&self) -> usize {
        match self {
            Wavelet::Haar => 2,
            Wavelet::Db2 => DB2.len(),
            Wavelet::Db3 => DB3.len(),
            Wavelet::Db4 => DB4.len(),
            Wavelet::Db8 => DB8.len(),
            Wavelet::Sym4 => SYM4.len(),
        }
    }

    pub fn filter_bank(&self) -> FilterBank {
        FilterBank::from_dec_lo(self.dec_lo())
    }
}

impl FromStr for Wavelet {
    type Err = TrajectoidError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "haar" | "db1" => Ok(Wavelet::Haar),
            "db2" => Ok(Wavelet::Db2),
            "db3" => Ok(Wavelet::Db3),
            "db4" => Ok(Wavelet::Db4),
            "db8" => Ok(Wavelet::Db8),
            "sym4" => Ok(Wavelet::Sym4),
            _ => Err(TrajectoidError::InvalidKernel(name.to_string())),
        }
    }
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Analysis and synthesis filters of an orthogonal wavelet.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBank {
    pub dec_lo: Vec<f64>,
    pub dec_hi: Vec<f64>,
    pub rec_lo: Vec<f64>,
    pub rec_hi: Vec<f64>,
}

impl FilterBank {
    /// Derives the remaining three filters from the decomposition low-pass:
    /// `rec_lo` reverses it, `dec_hi[k] = (-1)^(k+1) rec_lo[k]`, and `rec_hi`
    /// reverses `dec_hi`.
    pub fn from_dec_lo(dec_lo: Vec<f64>) -> Self {
        let rec_lo: Vec<f64> = dec_lo.iter().rev().copied().collect();
        let dec_hi: Vec<f64> = rec_lo
            .iter()
            .enumerate()
            .map(|(k, &c)| if k % 2 == 0 { -c } else { c })
            .collect();
        let rec_hi: Vec<f64> = dec_hi.iter().rev().copied().collect();
        Self {
            dec_lo,
            dec_hi,
            rec_lo,
            rec_hi,
        }
    }

    pub fn len(&self) -> usize {
        self.dec_lo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dec_lo.is_empty()
    }
}

/// Deepest level a signal of `data_len` samples supports for a filter of
/// `filter_len` taps.
pub fn max_level(data_len: usize, filter_len: usize) -> usize {
    if filter_len <= 1 || data_len < filter_len - 1 {
        return 0;
    }
    (data_len as f64 / (filter_len - 1) as f64).log2().floor() as usize
}

/// Wavelet coefficient bands, approximation first.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveletBands {
    bands: Vec<Vec<f64>>,
}

impl WaveletBands {
    pub fn new(bands: Vec<Vec<f64>>) -> Result<Self> {
        if bands.is_empty() {
            return Err(TrajectoidError::EmptyInput("wavelet band list is empty"));
        }
        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[Vec<f64>] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Number of detail bands.
    pub fn level(&self) -> usize {
        self.bands.len().saturating_sub(1)
    }

    /// All coefficients in band order.
    pub fn concatenated(&self) -> Vec<f64> {
        self.bands.iter().flatten().copied().collect()
    }

    /// Replaces every band whose index is not listed in `levels_to_keep` with
    /// zeros of the same length. See [`filter`].
    pub fn filter(&self, levels_to_keep: &[usize]) -> WaveletBands {
        filter(self, levels_to_keep)
    }

    pub fn reconstruct(&self, wavelet: Wavelet) -> Result<Vec<f64>> {
        reconstruct(self, wavelet)
    }
}

/// Folds an extended index back into `0..n` by half-sample symmetric
/// reflection: `... x1 x0 | x0 x1 ... x(n-1) | x(n-1) x(n-2) ...`.
fn symmetric_index(k: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = k.rem_euclid(period) as usize;
    if m < n { m } else { 2 * n - 1 - m }
}

/// One analysis step: convolve with both decomposition filters and keep the
/// odd outputs, `floor((n + F - 1) / 2)` per band.
fn analysis_step(signal: &[f64], bank: &FilterBank) -> (Vec<f64>, Vec<f64>) {
    let n = signal.len();
    let flen = bank.len();
    let out_len = (n + flen - 1) / 2;

    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);

    for o in 0..out_len {
        let i = (2 * o + 1) as isize;
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..flen {
            let x = signal[symmetric_index(i - j as isize, n)];
            a += bank.dec_lo[j] * x;
            d += bank.dec_hi[j] * x;
        }
        approx.push(a);
        detail.push(d);
    }

    (approx, detail)
}

/// One synthesis step: upsample both bands, convolve with the reconstruction
/// filters and keep the `2N - F + 2` samples not touched by the boundary.
fn synthesis_step(approx: &[f64], detail: &[f64], bank: &FilterBank) -> Result<Vec<f64>> {
    if approx.len() != detail.len() {
        return Err(TrajectoidError::mismatch("wavelet detail band", approx.len(), detail.len()));
    }
    let half = approx.len();
    let flen = bank.len();
    if 2 * half + 2 <= flen {
        return Err(TrajectoidError::mismatch("wavelet band length", flen / 2, half));
    }
    let out_len = 2 * half + 2 - flen;
    let skip = flen - 2;

    let mut result = vec![0.0; out_len];
    for k in 0..half {
        for j in 0..flen {
            let i = 2 * k + j;
            if i < skip || i - skip >= out_len {
                continue;
            }
            result[i - skip] += bank.rec_lo[j] * approx[k] + bank.rec_hi[j] * detail[k];
        }
    }
    Ok(result)
}

/// Decomposes `signal` into `level` detail bands plus the approximation.
///
/// A missing or too deep `level` is clamped to [`max_level`] for the signal
/// length and kernel.
pub fn decompose(signal: &[f64], wavelet: Wavelet, level: Option<usize>) -> Result<WaveletBands> {
    if signal.is_empty() {
        return Err(TrajectoidError::EmptyInput("signal has no samples"));
    }
    let bank = wavelet.filter_bank();
    let deepest = max_level(signal.len(), bank.len());
    let level = match level {
        Some(requested) if requested <= deepest => requested,
        Some(requested) => {
            log::debug!(
                "clamping {} level {} to {} for {} samples",
                wavelet,
                requested,
                deepest,
                signal.len()
            );
            deepest
        }
        None => deepest,
    };

    let mut approx = signal.to_vec();
    let mut details = Vec::with_capacity(level);
    for _ in 0..level {
        let (a, d) = analysis_step(&approx, &bank);
        details.push(d);
        approx = a;
    }

    let mut bands = Vec::with_capacity(level + 1);
    bands.push(approx);
    bands.extend(details.into_iter().rev());
    log::debug!(
        "{} decomposition at level {}: band lengths {:?}",
        wavelet,
        level,
        bands.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(WaveletBands { bands })
}

/// Keeps the bands listed in `levels_to_keep` and zeroes all others in place
/// of their original length. Indices past the last band are ignored.
pub fn filter(bands: &WaveletBands, levels_to_keep: &[usize]) -> WaveletBands {
    let bands = bands
        .bands
        .iter()
        .enumerate()
        .map(|(i, band)| {
            if levels_to_keep.contains(&i) {
                band.clone()
            } else {
                vec![0.0; band.len()]
            }
        })
        .collect();
    WaveletBands { bands }
}

/// Inverse multilevel transform.
///
/// The output may be a few samples longer than the signal that was decomposed
/// (odd lengths gain one sample per level boundary); truncating to the original
/// length is up to the caller.
pub fn reconstruct(bands: &WaveletBands, wavelet: Wavelet) -> Result<Vec<f64>> {
    let bank = wavelet.filter_bank();
    let mut iter = bands.bands.iter();
    let mut approx = match iter.next() {
        Some(first) => first.clone(),
        None => return Err(TrajectoidError::EmptyInput("wavelet band list is empty")),
    };

    for detail in iter {
        if approx.len() == detail.len() + 1 {
            approx.pop();
        }
        approx = synthesis_step(&approx, detail, &bank)?;
    }
    Ok(approx)
}

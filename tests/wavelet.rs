use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trajectoid::wavelet::{decompose, filter, max_level, reconstruct};
use trajectoid::{Signal, TrajectoidError, Wavelet, WaveletBands};

const KERNELS: [Wavelet; 6] = [
    Wavelet::Haar,
    Wavelet::Db2,
    Wavelet::Db3,
    Wavelet::Db4,
    Wavelet::Db8,
    Wavelet::Sym4,
];

fn random_samples(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        va += (x - ma).powi(2);
        vb += (y - mb).powi(2);
    }
    cov / (va * vb).sqrt()
}

#[test]
fn test_kernel_names() {
    for kernel in KERNELS {
        assert_eq!(kernel.name().parse::<Wavelet>().unwrap(), kernel);
    }
    assert_eq!("DB1".parse::<Wavelet>().unwrap(), Wavelet::Haar);
    assert_eq!(Wavelet::Db4.filter_len(), 8);
    assert_eq!(Wavelet::Db8.filter_len(), 16);

    let err = "morlet".parse::<Wavelet>().unwrap_err();
    assert!(matches!(err, TrajectoidError::InvalidKernel(ref name) if name == "morlet"));
}

#[test]
fn test_round_trip_all_kernels() {
    for kernel in KERNELS {
        for (len, seed) in [(64, 1), (1000, 2), (333, 3), (37, 4)] {
            let x = random_samples(len, seed);
            let bands = decompose(&x, kernel, None).unwrap();
            let y = reconstruct(&bands, kernel).unwrap();

            assert!(y.len() >= len, "{} len {}: rebuilt only {}", kernel, len, y.len());
            assert!(y.len() <= len + 1, "{} len {}: rebuilt {}", kernel, len, y.len());
            for i in 0..len {
                assert!(
                    (x[i] - y[i]).abs() < 1e-9,
                    "{} len {} sample {}: {} vs {}",
                    kernel, len, i, x[i], y[i]
                );
            }
        }
    }
}

#[test]
fn test_band_layout() {
    let x = random_samples(1000, 5);
    let bands = decompose(&x, Wavelet::Db4, Some(4)).unwrap();
    let lengths: Vec<usize> = bands.bands().iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![69, 69, 131, 255, 503]);
    assert_eq!(bands.level(), 4);
    assert_eq!(bands.concatenated().len(), 1027);

    let haar = decompose(&x[..100], Wavelet::Haar, Some(3)).unwrap();
    let lengths: Vec<usize> = haar.bands().iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![13, 13, 25, 50]);
}

#[test]
fn test_level_is_clamped() {
    assert_eq!(max_level(1000, 8), 7);
    assert_eq!(max_level(100, 2), 6);
    assert_eq!(max_level(5, 8), 0);

    let x = random_samples(1000, 6);
    let deep = decompose(&x, Wavelet::Db4, Some(20)).unwrap();
    assert_eq!(deep.level(), 7);
    let default = decompose(&x, Wavelet::Db4, None).unwrap();
    assert_eq!(default, deep);

    let short = decompose(&x[..5], Wavelet::Db4, Some(2)).unwrap();
    assert_eq!(short.len(), 1);
    assert_eq!(short.bands()[0], x[..5].to_vec());
}

#[test]
fn test_filter_preserves_shapes() {
    let x = random_samples(500, 7);
    let bands = decompose(&x, Wavelet::Sym4, Some(3)).unwrap();
    let filtered = filter(&bands, &[0, 2, 9]);

    assert_eq!(filtered.len(), bands.len());
    for (i, (kept, original)) in filtered.bands().iter().zip(bands.bands()).enumerate() {
        assert_eq!(kept.len(), original.len(), "band {} changed length", i);
        if i == 0 || i == 2 {
            assert_eq!(kept, original);
        } else {
            assert!(kept.iter().all(|&c| c == 0.0), "band {} not zeroed", i);
        }
    }
}

#[test]
fn test_inconsistent_bands_are_rejected() {
    let bands = WaveletBands::new(vec![vec![0.0; 10], vec![0.0; 4]]).unwrap();
    assert!(matches!(
        reconstruct(&bands, Wavelet::Db2),
        Err(TrajectoidError::ShapeMismatch { .. })
    ));
    assert!(WaveletBands::new(Vec::new()).is_err());
    assert!(decompose(&[], Wavelet::Haar, None).is_err());
}

#[test]
fn test_scenario_keeps_trend() {
    let signal = Signal::tones(&[(1.0, 50.0), (1.0, 120.0)], 1000.0, 1.0).unwrap();
    let x = signal.samples();
    let bands = decompose(x, Wavelet::Db4, Some(4)).unwrap();
    let mut y = bands.filter(&[0, 1]).reconstruct(Wavelet::Db4).unwrap();
    y.truncate(x.len());
    assert_eq!(y.len(), 1000);

    let r = pearson(x, &y);
    assert!(r > 0.5, "correlation {}", r);

    // Dropping the finer detail bands smooths the signal out
    let variation = |v: &[f64]| v.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>();
    assert!(variation(&y) < 0.5 * variation(x));
    let energy = |v: &[f64]| v.iter().map(|s| s * s).sum::<f64>();
    assert!(energy(&y) < energy(x));
}

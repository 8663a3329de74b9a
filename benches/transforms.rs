use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trajectoid::{spectral, wavelet, FrequencyBand, Signal, Wavelet};

fn scenario(rate: f64) -> Signal {
    Signal::tones(&[(1.0, 50.0), (1.0, 120.0)], rate, 1.0).unwrap()
}

fn benchmark_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral_round_trip");
    for rate in [1_000.0, 16_384.0, 100_000.0] {
        let signal = scenario(rate);
        let band = FrequencyBand::new(40.0, 130.0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(signal.len()), &signal, |b, s| {
            b.iter(|| {
                let spectrum = spectral::decompose(black_box(s));
                let filtered = spectrum.filter(Some(band), None).unwrap();
                filtered.reconstruct()
            })
        });
    }
    group.finish();
}

fn benchmark_wavelet(c: &mut Criterion) {
    let signal = scenario(16_384.0);
    let mut group = c.benchmark_group("wavelet_round_trip");
    for kernel in [Wavelet::Haar, Wavelet::Db4, Wavelet::Db8, Wavelet::Sym4] {
        group.bench_with_input(BenchmarkId::from_parameter(kernel), &kernel, |b, &k| {
            b.iter(|| {
                let bands = wavelet::decompose(black_box(signal.samples()), k, Some(4)).unwrap();
                bands.filter(&[0, 1]).reconstruct(k).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_spectral, benchmark_wavelet);
criterion_main!(benches);

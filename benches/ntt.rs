use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ntt::dft::bfly::BflyPlan;
use ntt::dft::gemm::GemmPlan;
use ntt::mult::Multiplier;

fn bfly_ntt(c: &mut Criterion) {
    fn runner(plan: BflyPlan) -> Box<dyn FnMut()> {
        let n = plan.n as usize;
        let inp: Vec<i64> = (0..n as i64).collect();
        let mut out = vec![0i64; n];
        Box::new(move || {
            plan.ntt(&inp, &mut out);
        })
    }

    let mut b = c.benchmark_group("bfly_ntt");
    for log_n in 8..14 {
        let n: i64 = 1 << log_n;
        let plan = BflyPlan::new(n, None).unwrap();
        let runners = [("auto_prime", runner(plan))];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn gemm_ntt(c: &mut Criterion) {
    fn runner(plan: GemmPlan) -> Box<dyn FnMut()> {
        let n = plan.n as usize;
        let inp: Vec<i64> = (0..n as i64).collect();
        let mut out = vec![0i64; n];
        Box::new(move || {
            plan.ntt(&inp, &mut out);
        })
    }

    let mut b = c.benchmark_group("gemm_ntt");
    for log_n in 4..10 {
        let n: i64 = 1 << log_n;
        let plan = GemmPlan::new(n, None).unwrap();
        let runners = [("auto_prime", runner(plan))];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn multiply(c: &mut Criterion) {
    fn runner(mut m: Multiplier) -> Box<dyn FnMut()> {
        let n = m.n() as usize;
        let a: Vec<i64> = (0..n as i64).map(|i| i % 256).collect();
        let b: Vec<i64> = (0..n as i64).map(|i| (i * 7) % 256).collect();
        let mut out = vec![0i64; n];
        Box::new(move || {
            m.multiply(&a, &b, &mut out);
        })
    }

    let mut b = c.benchmark_group("multiply");
    for log_n in 8..14 {
        let n: i64 = 1 << log_n;
        let m = Multiplier::new(n, 255).unwrap();
        let runners = [("base256", runner(m))];
        for (name, mut runner) in runners {
            let id = BenchmarkId::new(name, n);
            b.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }
}

criterion_group!(benches, bfly_ntt, gemm_ntt, multiply);
criterion_main!(benches);

use heatplate::config::{Backend, SolverOptions};
use heatplate::context::PlateContext;
use heatplate::report::RowSampler;

fn main() {
    tracing_subscriber::fmt::init();

    // usage: heated_plate [extent] [tolerance] [serial]
    let mut args = std::env::args().skip(1);
    let extent: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(1024);
    let tol: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.01);
    let mut opts = SolverOptions::new(extent, extent).with_tolerance(tol);
    if args.next().as_deref() == Some("serial") {
        opts = opts.with_backend(Backend::Serial);
    }

    let mut plate = match PlateContext::<f64>::new(opts) {
        Ok(plate) => plate,
        Err(e) => {
            eprintln!("cannot set up plate: {e}");
            std::process::exit(1);
        }
    };
    let mut reporter = RowSampler::new(std::io::stdout().lock());
    match plate.run(&mut reporter) {
        Ok(stats) => println!("\n{stats}"),
        Err(e) => {
            eprintln!("relaxation failed: {e}");
            std::process::exit(1);
        }
    }
}

use flp_pareto::{
    compute_pareto_frontier, load_instance, print_frontier, ParetoStrategy, SolverBackend,
    SolverFactory,
};
use std::process;
use std::str::FromStr;

const USAGE: &str =
    "usage: flp-pareto <instance-file> [--strategy lex|direct] [--backend auto|highs|cbc]";

fn main() {
    let mut args = std::env::args().skip(1);
    let mut path: Option<String> = None;
    let mut strategy = ParetoStrategy::Lexicographic;
    let mut backend = SolverBackend::Auto;

    while let Some(arg) = args.next() {
        if arg == "--strategy" {
            strategy = flag_value(args.next(), "--strategy");
        } else if arg == "--backend" {
            backend = flag_value(args.next(), "--backend");
        } else if arg == "--help" || arg == "-h" {
            println!("{}", USAGE);
            return;
        } else if path.is_none() && !arg.starts_with('-') {
            path = Some(arg);
        } else {
            usage_error(&format!("unexpected argument '{}'", arg));
        }
    }

    let path = match path {
        Some(p) => p,
        None => usage_error("missing instance file"),
    };

    let instance = match load_instance(&path) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("can't load {}: {}", path, e);
            process::exit(2);
        }
    };
    println!("Loaded {}: {}", path, instance);

    let solver = match SolverFactory::create(backend) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(3);
        }
    };
    println!("Using solver: {} ({} strategy)", solver.name(), strategy);

    let frontier = compute_pareto_frontier(&instance, strategy, solver.as_ref());
    print_frontier(&frontier);
}

fn flag_value<T>(value: Option<String>, flag: &str) -> T
where
    T: FromStr<Err = String>,
{
    match value {
        Some(v) => v.parse().unwrap_or_else(|e: String| usage_error(&e)),
        None => usage_error(&format!("{} requires a value", flag)),
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}\n{}", message, USAGE);
    process::exit(1);
}
